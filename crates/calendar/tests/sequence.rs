use tethys_calendar::{Calendar, DateTime, Frequency, date_range};

#[test]
fn full_gregorian_leap_year() {
    let g = Calendar::ProlepticGregorian;
    let start = DateTime::date(g, 2000, 1, 1).unwrap();
    let dates = date_range(g, start, &Frequency::DAILY, 366);
    assert_eq!(dates.len(), 366);
    assert_eq!(dates[59], DateTime::date(g, 2000, 2, 29).unwrap());
    assert_eq!(dates[365], DateTime::date(g, 2000, 12, 31).unwrap());
}

#[test]
fn noleap_year_skips_february_29() {
    let cal = Calendar::NoLeap;
    let start = DateTime::date(cal, 2000, 1, 1).unwrap();
    let dates = date_range(cal, start, &Frequency::DAILY, 366);
    assert_eq!(dates[59], DateTime::date(cal, 2000, 3, 1).unwrap());
    assert_eq!(dates[365], DateTime::date(cal, 2001, 1, 1).unwrap());
}

#[test]
fn day360_months_have_thirty_days() {
    let cal = Calendar::Day360;
    let start = DateTime::date(cal, 2000, 2, 29).unwrap();
    let dates = date_range(cal, start, &Frequency::DAILY, 3);
    assert_eq!(dates[1], DateTime::date(cal, 2000, 2, 30).unwrap());
    assert_eq!(dates[2], DateTime::date(cal, 2000, 3, 1).unwrap());
}

#[test]
fn quarterly_starts() {
    let g = Calendar::ProlepticGregorian;
    let qs: Frequency = "QS-DEC".parse().unwrap();
    let start = DateTime::date(g, 2001, 12, 1).unwrap();
    let dates = date_range(g, start, &qs, 5);
    let months: Vec<u8> = dates.iter().map(|d| d.month()).collect();
    assert_eq!(months, vec![12, 3, 6, 9, 12]);
    assert_eq!(dates[4].year(), 2002);
}

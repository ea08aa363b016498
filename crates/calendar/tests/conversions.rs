use tethys_calendar::{Calendar, CalendarError, DateTime, SECONDS_PER_DAY};

const ALL: [Calendar; 5] = [
    Calendar::ProlepticGregorian,
    Calendar::Julian,
    Calendar::NoLeap,
    Calendar::AllLeap,
    Calendar::Day360,
];

#[test]
fn consecutive_days_are_one_day_apart() {
    for cal in ALL {
        let mut prev = DateTime::date(cal, 1999, 1, 1).unwrap();
        for _ in 0..1500 {
            let next = DateTime::from_seconds(cal, prev.to_seconds(cal) + SECONDS_PER_DAY);
            assert!(next > prev, "{cal}: {next} should follow {prev}");
            assert_eq!(next.days(cal) - prev.days(cal), 1);
            prev = next;
        }
    }
}

#[test]
fn year_lengths_per_calendar() {
    let span = |cal: Calendar, year: i32| {
        DateTime::date(cal, year + 1, 1, 1).unwrap().days(cal)
            - DateTime::date(cal, year, 1, 1).unwrap().days(cal)
    };
    assert_eq!(span(Calendar::ProlepticGregorian, 2000), 366);
    assert_eq!(span(Calendar::ProlepticGregorian, 1900), 365);
    assert_eq!(span(Calendar::Julian, 1900), 366);
    assert_eq!(span(Calendar::NoLeap, 2000), 365);
    assert_eq!(span(Calendar::AllLeap, 2001), 366);
    assert_eq!(span(Calendar::Day360, 2000), 360);
}

#[test]
fn day_of_year_on_december_31() {
    let g = Calendar::ProlepticGregorian;
    assert_eq!(DateTime::date(g, 2000, 12, 31).unwrap().day_of_year(g), 366);
    assert_eq!(DateTime::date(g, 2001, 12, 31).unwrap().day_of_year(g), 365);
    let d360 = Calendar::Day360;
    assert_eq!(DateTime::date(d360, 2001, 12, 30).unwrap().day_of_year(d360), 360);
}

#[test]
fn invalid_components_are_rejected_per_calendar() {
    assert!(DateTime::date(Calendar::ProlepticGregorian, 1900, 2, 29).is_err());
    assert!(DateTime::date(Calendar::Julian, 1900, 2, 29).is_ok());
    assert_eq!(
        DateTime::date(Calendar::Day360, 2000, 1, 31).unwrap_err(),
        CalendarError::InvalidDay {
            day: 31,
            month: 1,
            year: 2000,
            max_day: 30,
        }
    );
}

#[test]
fn negative_seconds_before_epoch() {
    let g = Calendar::ProlepticGregorian;
    let dt = DateTime::from_seconds(g, -1);
    assert_eq!(dt, DateTime::new(g, 0, 12, 31, 23, 59, 59).unwrap());
    assert_eq!(dt.to_seconds(g), -1);
}

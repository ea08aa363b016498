//! Temperature reducers.

use tethys_checks::{PeriodRecords, TimeSeries};

use crate::indicator::Reducer;

pub(crate) fn tg_mean_reducer(_: &TimeSeries) -> Reducer {
    Box::new(|r: &PeriodRecords<'_>| tethys_stats::mean(r.values()))
}

//! Registry of the available indicators.

use tethys_calendar::Frequency;

use crate::error::IndicesError;
use crate::indicator::{Computation, Indicator};
use crate::{streamflow, temperature};

const STREAMFLOW: Option<&str> = Some("water_volume_transport_in_river_channel");

const YEARLY: Computation = Computation::Resampling {
    freq: Frequency::YEAR_START,
};

static CATALOG: [Indicator; 8] = [
    Indicator {
        identifier: "base_flow_index",
        title: "Base flow index",
        description: "Minimum of the 7-day moving average flow divided by the mean flow.",
        units: "",
        src_freq: Frequency::DAILY,
        standard_name: STREAMFLOW,
        computation: YEARLY,
        reducer: streamflow::base_flow_index_reducer,
    },
    Indicator {
        identifier: "rb_flashiness_index",
        title: "Richards-Baker Flashiness Index",
        description: "Sum of absolute day-to-day flow changes divided by total flow.",
        units: "",
        src_freq: Frequency::DAILY,
        standard_name: STREAMFLOW,
        computation: YEARLY,
        reducer: streamflow::rb_flashiness_reducer,
    },
    Indicator {
        identifier: "doy_qmax",
        title: "Day of year of the maximum streamflow",
        description: "Day of the year of the maximum streamflow.",
        units: "",
        src_freq: Frequency::DAILY,
        standard_name: STREAMFLOW,
        computation: YEARLY,
        reducer: streamflow::doy_max_reducer,
    },
    Indicator {
        identifier: "doy_strfmin",
        title: "Day of year of the minimum streamflow",
        description: "Day of the year of the minimum streamflow.",
        units: "",
        src_freq: Frequency::DAILY,
        standard_name: STREAMFLOW,
        computation: YEARLY,
        reducer: streamflow::doy_min_reducer,
    },
    Indicator {
        identifier: "high_flow_frequency",
        title: "High flow frequency",
        description: "Number of days with flow greater than 9 times the median flow.",
        units: "days",
        src_freq: Frequency::DAILY,
        standard_name: STREAMFLOW,
        computation: YEARLY,
        reducer: streamflow::high_flow_reducer,
    },
    Indicator {
        identifier: "low_flow_frequency",
        title: "Low flow frequency",
        description: "Number of days with flow smaller than 0.2 times the mean flow.",
        units: "days",
        src_freq: Frequency::DAILY,
        standard_name: STREAMFLOW,
        computation: YEARLY,
        reducer: streamflow::low_flow_reducer,
    },
    Indicator {
        identifier: "flow_index",
        title: "Flow index",
        description: "95th percentile normalized by the median flow.",
        units: "1",
        src_freq: Frequency::DAILY,
        standard_name: STREAMFLOW,
        computation: Computation::Reducing,
        reducer: streamflow::flow_index_reducer,
    },
    Indicator {
        identifier: "tg_mean",
        title: "Mean daily temperature",
        description: "Mean of daily mean temperature.",
        units: "K",
        src_freq: Frequency::DAILY,
        standard_name: Some("air_temperature"),
        computation: YEARLY,
        reducer: temperature::tg_mean_reducer,
    },
];

/// All indicators, in a stable order.
pub fn catalog() -> &'static [Indicator] {
    &CATALOG
}

/// Finds an indicator by identifier.
///
/// # Errors
///
/// Returns [`IndicesError::UnknownIndicator`] if no indicator matches.
pub fn lookup(identifier: &str) -> Result<&'static Indicator, IndicesError> {
    CATALOG
        .iter()
        .find(|i| i.identifier == identifier)
        .ok_or_else(|| IndicesError::UnknownIndicator {
            identifier: identifier.to_string(),
        })
}

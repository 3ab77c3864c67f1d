use crate::presenter::formatters::{Formatter, demand_percent, equipment_status, fan_mode, humidity, temperature};

/// A row of the device table.
#[derive(Debug)]
pub enum MetricRow {
    Separator,
    Metric(Metric),
}

#[derive(Debug)]
pub struct Metric {
    pub label: &'static str,
    /// Candidate field names, tried in order. Furnace (IFC) and air handler (AH) systems report
    /// the same demand under different names.
    pub keys: &'static [&'static str],
    pub formatter: Option<Formatter>,
}

const fn metric(label: &'static str, keys: &'static [&'static str], formatter: Formatter) -> MetricRow {
    MetricRow::Metric(Metric {
        label,
        keys,
        formatter: Some(formatter),
    })
}

pub const METRICS: &[MetricRow] = &[
    metric("Indoor Temp", &["tempIndoor"], temperature),
    metric("Indoor Humidity", &["humIndoor"], humidity),
    metric("Outdoor Temp", &["tempOutdoor"], temperature),
    metric("Outdoor Humidity", &["humOutdoor"], humidity),
    MetricRow::Separator,
    metric("System Status", &["equipmentStatus"], equipment_status),
    metric("Target Cool SP", &["cspActive"], temperature),
    metric("Target Heat SP", &["hspActive"], temperature),
    metric("Fan Mode", &["fanCirculate"], fan_mode),
    MetricRow::Separator,
    metric(
        "Furnace Heat Demand",
        &["ctIFCHeatRequestedDemandPercent", "ctAHHeatRequestedDemandPercent"],
        demand_percent,
    ),
    metric(
        "AC Cool Demand",
        &["ctIFCCoolRequestedDemandPercent", "ctAHCoolRequestedDemandPercent"],
        demand_percent,
    ),
    metric(
        "Fan Demand",
        &["ctIFCFanRequestedDemandPercent", "ctAHFanRequestedDemandPercent"],
        demand_percent,
    ),
    metric(
        "Humidity Demand",
        &["ctIFCHumRequestedDemandPercent", "ctAHHumRequestedDemandPercent"],
        demand_percent,
    ),
];

use serde::{Deserialize, Serialize};

use crate::domain::KpiId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KpiValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiMetric {
    pub id: KpiId,
    pub label: String,
    pub value: KpiValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl KpiMetric {
    pub fn new(id: &str, label: &str, value: KpiValue) -> Self {
        Self {
            id: KpiId::from(id),
            label: label.to_string(),
            value,
            delta: None,
            unit: None,
        }
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    fn unit(&self) -> &str {
        self.unit.as_deref().unwrap_or_default()
    }

    /// Numbers carry the unit (`99.97%`); text values are shown as-is.
    pub fn formatted_value(&self) -> String {
        match &self.value {
            KpiValue::Number(value) => format!("{value}{}", self.unit()),
            KpiValue::Text(text) => text.clone(),
        }
    }

    /// Signed change with unit, `+` only for growth. `None` when no delta is reported.
    pub fn formatted_delta(&self) -> Option<String> {
        let delta = self.delta?;
        let prefix = if delta > 0.0 { "+" } else { "" };
        Some(format!("{prefix}{delta}{}", self.unit()))
    }

    pub fn trend(&self) -> Trend {
        match self.delta {
            Some(delta) if delta > 0.0 => Trend::Up,
            Some(delta) if delta < 0.0 => Trend::Down,
            _ => Trend::Flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_numeric_values_with_unit() {
        let uptime = KpiMetric::new("kpi-uptime", "Uptime", KpiValue::Number(99.97))
            .with_delta(0.05)
            .with_unit("%");
        assert_eq!(uptime.formatted_value(), "99.97%");
        assert_eq!(uptime.formatted_delta().as_deref(), Some("+0.05%"));
        assert_eq!(uptime.trend(), Trend::Up);
    }

    #[test]
    fn formats_text_values_and_flat_deltas() {
        let risk = KpiMetric::new("kpi-sla", "SLA Risk", KpiValue::Text("Low".into())).with_delta(0.0);
        assert_eq!(risk.formatted_value(), "Low");
        assert_eq!(risk.formatted_delta().as_deref(), Some("0"));
        assert_eq!(risk.trend(), Trend::Flat);
    }

    #[test]
    fn negative_and_missing_deltas() {
        let incidents =
            KpiMetric::new("kpi-incidents", "Open Incidents", KpiValue::Number(14.0)).with_delta(-3.0);
        assert_eq!(incidents.formatted_value(), "14");
        assert_eq!(incidents.formatted_delta().as_deref(), Some("-3"));
        assert_eq!(incidents.trend(), Trend::Down);

        let bare = KpiMetric::new("kpi-bare", "Bare", KpiValue::Number(1.5));
        assert_eq!(bare.formatted_delta(), None);
        assert_eq!(bare.trend(), Trend::Flat);
    }

    #[test]
    fn deserializes_mixed_value_types() {
        let metrics: Vec<KpiMetric> = serde_json::from_str(
            r#"[{"id":"a","label":"A","value":182,"delta":-12,"unit":"ms"},{"id":"b","label":"B","value":"Low"}]"#,
        )
        .expect("metrics");
        assert_eq!(metrics[0].formatted_value(), "182ms");
        assert_eq!(metrics[1].value, KpiValue::Text("Low".into()));
    }
}

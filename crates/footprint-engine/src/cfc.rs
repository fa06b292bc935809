//! 制冷剂（CFC/HCFC/HFC）泄漏与处置影响估算
//!
//! 按设备默认充注量、事件释放比例、制冷剂 GWP 与 ODP 估算 CO₂ 当量和臭氧消耗。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rounding::round_to;

type Table = &'static [(&'static str, f64)];

/// 设备默认制冷剂充注量（kg）
const DEVICE_CFC_CONTENT: Table = &[
    ("AC", 1.5),
    ("Refrigerator", 0.2),
    ("Freezer", 0.3),
    ("Dehumidifier", 0.15),
    ("Car AC", 0.6),
    ("Water Cooler", 0.25),
    ("Ice Maker", 0.3),
    ("Heat Pump", 2.0),
    ("Chiller", 10.0),
    ("Walk-in Cooler", 5.0),
    ("Commercial Refrigeration", 8.0),
    ("Window AC", 1.0),
    ("Split AC", 1.5),
    ("Central AC", 3.0),
    ("Car Refrigerator", 0.1),
];

const DEFAULT_DEVICE_CONTENT: f64 = 1.0;

/// 全球变暖潜能值（相对 CO₂）
const REFRIGERANT_GWP: Table = &[
    ("CFC-12", 10900.0),
    ("CFC-11", 4660.0),
    ("HCFC-22", 1810.0),
    ("HCFC-141b", 725.0),
    ("HFC-134a", 1300.0),
    ("R-410A", 2088.0),
    ("R-404A", 3922.0),
    ("Unknown", 5000.0),
];

const DEFAULT_GWP: f64 = 5000.0;

/// 不同事件的释放比例
const ISSUE_MULTIPLIERS: Table = &[
    ("Gas leak", 0.5),
    ("Disposal", 0.8),
    ("Servicing", 0.1),
    ("Replacement", 0.7),
    ("Improper disposal", 0.9),
    ("Recycling", 0.1),
    ("Maintenance check", 0.05),
    ("Refrigerant recharge", 0.2),
    ("System upgrade", 0.3),
];

const DEFAULT_ISSUE_MULTIPLIER: f64 = 0.5;

/// 臭氧消耗潜能值
const OZONE_DEPLETION_POTENTIAL: Table = &[
    ("CFC-12", 1.0),
    ("CFC-11", 1.0),
    ("HCFC-22", 0.055),
    ("HCFC-141b", 0.11),
    ("HFC-134a", 0.0),
    ("R-410A", 0.0),
    ("R-404A", 0.0),
    ("Unknown", 0.5),
];

const DEFAULT_ODP: f64 = 0.5;

fn lookup(table: Table, key: &str, default: f64) -> f64 {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(default)
}

/// 影响等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImpactLevel {
    Minimal,
    Low,
    Medium,
    High,
    VeryHigh,
    Extreme,
}

impl ImpactLevel {
    /// 按 CO₂ 当量（kg）分级
    pub fn from_co2e(co2e_kg: f64) -> Self {
        if co2e_kg >= 10000.0 {
            Self::Extreme
        } else if co2e_kg >= 5000.0 {
            Self::VeryHigh
        } else if co2e_kg >= 1000.0 {
            Self::High
        } else if co2e_kg >= 500.0 {
            Self::Medium
        } else if co2e_kg >= 100.0 {
            Self::Low
        } else {
            Self::Minimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ImpactLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 估算输入
#[derive(Debug, Clone, Deserialize)]
pub struct CfcInput {
    pub device: String,
    pub issue_type: String,
    /// 缺省为 "Unknown"
    #[serde(default)]
    pub refrigerant_type: Option<String>,
    /// 缺省取设备默认充注量
    #[serde(default)]
    pub refrigerant_amount_kg: Option<f64>,
    #[serde(default)]
    pub device_age_years: Option<i32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CfcEquivalents {
    pub car_km: f64,
    pub trees_needed: f64,
    pub person_days: f64,
}

/// 估算结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CfcImpact {
    pub device: String,
    pub issue_type: String,
    pub refrigerant_type: String,
    pub refrigerant_amount_kg: f64,
    pub cfc_released_kg: f64,
    pub gwp: f64,
    pub co2_equivalent_kg: f64,
    pub ozone_depletion: f64,
    pub device_age_years: Option<i32>,
    pub age_factor: f64,
    pub impact_level: ImpactLevel,
    pub equivalents: CfcEquivalents,
}

/// 设备默认参数
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeviceDefaults {
    pub refrigerant_amount_kg: f64,
    pub typical_refrigerant: &'static str,
}

/// 老旧设备泄漏更严重，新设备较轻
fn age_factor(device_age_years: Option<i32>) -> f64 {
    match device_age_years {
        None => 1.0,
        Some(age) if age > 20 => 1.2,
        Some(age) if age > 15 => 1.1,
        Some(age) if age > 10 => 1.0,
        Some(_) => 0.8,
    }
}

pub fn calculate_cfc_impact(input: &CfcInput) -> CfcImpact {
    let refrigerant_type = input.refrigerant_type.as_deref().unwrap_or("Unknown");
    let amount = input
        .refrigerant_amount_kg
        .unwrap_or_else(|| lookup(DEVICE_CFC_CONTENT, &input.device, DEFAULT_DEVICE_CONTENT));

    let multiplier = lookup(ISSUE_MULTIPLIERS, &input.issue_type, DEFAULT_ISSUE_MULTIPLIER);
    let gwp = lookup(REFRIGERANT_GWP, refrigerant_type, DEFAULT_GWP);
    let odp = lookup(OZONE_DEPLETION_POTENTIAL, refrigerant_type, DEFAULT_ODP);
    let age_factor = age_factor(input.device_age_years);

    let released = amount * multiplier;
    let co2e = released * gwp * age_factor;
    let ozone = released * odp;

    CfcImpact {
        device: input.device.clone(),
        issue_type: input.issue_type.clone(),
        refrigerant_type: refrigerant_type.to_string(),
        refrigerant_amount_kg: round_to(amount, 2),
        cfc_released_kg: round_to(released, 3),
        gwp,
        co2_equivalent_kg: round_to(co2e, 2),
        ozone_depletion: round_to(ozone, 3),
        device_age_years: input.device_age_years,
        age_factor: round_to(age_factor, 2),
        impact_level: ImpactLevel::from_co2e(co2e),
        equivalents: CfcEquivalents {
            car_km: round_to(co2e / 0.171, 2),
            trees_needed: round_to(co2e / 22.0, 1),
            person_days: round_to(co2e / 4.5, 1),
        },
    }
}

fn keys(table: Table) -> Vec<&'static str> {
    table.iter().map(|(k, _)| *k).collect()
}

/// 支持的制冷剂类型
pub fn refrigerant_types() -> Vec<&'static str> {
    keys(REFRIGERANT_GWP)
}

/// 有默认充注量的设备
pub fn devices() -> Vec<&'static str> {
    keys(DEVICE_CFC_CONTENT)
}

/// 有释放比例的事件类型
pub fn issue_types() -> Vec<&'static str> {
    keys(ISSUE_MULTIPLIERS)
}

pub fn device_defaults(device: &str) -> DeviceDefaults {
    let typical_refrigerant = match device {
        "AC" | "Refrigerator" | "Freezer" => "CFC-12",
        _ => "Unknown",
    };
    DeviceDefaults {
        refrigerant_amount_kg: lookup(DEVICE_CFC_CONTENT, device, DEFAULT_DEVICE_CONTENT),
        typical_refrigerant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(device: &str, issue: &str) -> CfcInput {
        CfcInput {
            device: device.to_string(),
            issue_type: issue.to_string(),
            refrigerant_type: None,
            refrigerant_amount_kg: None,
            device_age_years: None,
        }
    }

    #[test]
    fn test_ac_gas_leak_with_defaults() {
        let r = calculate_cfc_impact(&input("AC", "Gas leak"));
        assert_eq!(r.refrigerant_type, "Unknown");
        assert_eq!(r.refrigerant_amount_kg, 1.5);
        assert_eq!(r.cfc_released_kg, 0.75);
        assert_eq!(r.co2_equivalent_kg, 3750.0);
        assert_eq!(r.ozone_depletion, 0.375);
        assert_eq!(r.impact_level, ImpactLevel::High);
        assert_eq!(r.equivalents.trees_needed, 170.5);
    }

    #[test]
    fn test_cfc12_refrigerator_disposal_old_device() {
        let mut i = input("Refrigerator", "Disposal");
        i.refrigerant_type = Some("CFC-12".to_string());
        i.device_age_years = Some(25);
        let r = calculate_cfc_impact(&i);
        // 0.2 * 0.8 = 0.16; 0.16 * 10900 * 1.2 = 2092.8
        assert_eq!(r.cfc_released_kg, 0.16);
        assert_eq!(r.co2_equivalent_kg, 2092.8);
        assert_eq!(r.age_factor, 1.2);
        assert_eq!(r.ozone_depletion, 0.16);
    }

    #[test]
    fn test_unknown_device_and_issue_use_defaults() {
        let r = calculate_cfc_impact(&input("Toaster", "Exploded"));
        assert_eq!(r.refrigerant_amount_kg, 1.0);
        assert_eq!(r.cfc_released_kg, 0.5);
        assert_eq!(r.co2_equivalent_kg, 2500.0);
    }

    #[test]
    fn test_age_factor_bands() {
        assert_eq!(age_factor(None), 1.0);
        assert_eq!(age_factor(Some(21)), 1.2);
        assert_eq!(age_factor(Some(16)), 1.1);
        assert_eq!(age_factor(Some(11)), 1.0);
        assert_eq!(age_factor(Some(10)), 0.8);
        assert_eq!(age_factor(Some(0)), 0.8);
    }

    #[test]
    fn test_impact_level_thresholds() {
        assert_eq!(ImpactLevel::from_co2e(10000.0), ImpactLevel::Extreme);
        assert_eq!(ImpactLevel::from_co2e(5000.0), ImpactLevel::VeryHigh);
        assert_eq!(ImpactLevel::from_co2e(999.99), ImpactLevel::Medium);
        assert_eq!(ImpactLevel::from_co2e(100.0), ImpactLevel::Low);
        assert_eq!(ImpactLevel::from_co2e(99.9), ImpactLevel::Minimal);
        assert_eq!(ImpactLevel::VeryHigh.to_string(), "Very High");
    }

    #[test]
    fn test_refrigerant_types_and_device_defaults() {
        let types = refrigerant_types();
        assert_eq!(types.first(), Some(&"CFC-12"));
        assert_eq!(types.last(), Some(&"Unknown"));
        assert_eq!(types.len(), 8);

        assert_eq!(device_defaults("Freezer").typical_refrigerant, "CFC-12");
        assert_eq!(device_defaults("Chiller").refrigerant_amount_kg, 10.0);
        assert_eq!(device_defaults("Chiller").typical_refrigerant, "Unknown");
        assert_eq!(device_defaults("Spaceship").refrigerant_amount_kg, 1.0);
    }

    #[test]
    fn test_device_and_issue_listings() {
        let devices = devices();
        assert_eq!(devices.len(), 15);
        assert_eq!(devices.first(), Some(&"AC"));
        assert!(devices.contains(&"Car Refrigerator"));

        let issues = issue_types();
        assert_eq!(issues.len(), 9);
        assert_eq!(issues.first(), Some(&"Gas leak"));
        assert_eq!(issues.last(), Some(&"System upgrade"));
    }

    #[test]
    fn test_result_json_field_names() {
        let mut i = input("AC", "Servicing");
        i.device_age_years = Some(12);
        let json = serde_json::to_value(calculate_cfc_impact(&i)).unwrap();

        assert_eq!(json["cfc_released_kg"], 0.15);
        assert_eq!(json["ozone_depletion"], 0.075);
        assert_eq!(json["device_age_years"], 12);
        assert_eq!(json["impact_level"], "Medium");
        assert!(json.get("released_amount_kg").is_none());

        let json = serde_json::to_value(calculate_cfc_impact(&input("AC", "Servicing"))).unwrap();
        assert!(json["device_age_years"].is_null());
    }
}

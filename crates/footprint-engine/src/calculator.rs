//! 活动碳排放计算
//!
//! 按类别查表得到排放因子（kg CO₂e / 单位），乘以数量后保留两位小数。
//! 因子表保持声明顺序，`factors()` 按该顺序对外暴露。

use serde::Serialize;
use serde_json::{Value, json};

use crate::models::Category;
use crate::rounding::round_to;

pub type FactorTable = &'static [(&'static str, f64)];

// ==================== 排放因子表 ====================

/// 交通（kg CO₂ / km）
const TRANSPORT: FactorTable = &[
    ("car", 0.171),
    ("car_small", 0.120),
    ("car_large", 0.250),
    ("plane", 0.255),
    ("plane_international", 0.195),
    ("electric_vehicle", 0.051),
    ("hybrid_car", 0.105),
    ("motorcycle", 0.113),
    ("scooter", 0.060),
    ("bike", 0.0),
    ("walking", 0.0),
    ("rickshaw", 0.015),
    ("auto_rickshaw", 0.080),
    ("cng", 0.075),
    ("boat", 0.120),
    ("tuk_tuk", 0.085),
];

/// 饮食（kg CO₂ / kg）
const DIET: FactorTable = &[
    ("beef", 60.0),
    ("mutton", 24.0),
    ("pork", 7.0),
    ("chicken", 6.0),
    ("duck", 5.5),
    ("fish", 5.0),
    ("seafood", 5.5),
    ("prawn", 6.0),
    ("eggs", 4.2),
    ("milk", 3.2),
    ("yogurt", 3.5),
    ("cheese", 21.0),
    ("butter", 12.0),
    ("ghee", 11.0),
    ("rice", 4.0),
    ("wheat", 1.4),
    ("roti", 1.2),
    ("naan", 1.3),
    ("bread", 1.0),
    ("pasta", 1.4),
    ("noodles", 1.5),
    ("dal", 0.9),
    ("lentils", 0.9),
    ("chickpeas", 1.0),
    ("beans", 2.0),
    ("black_gram", 0.9),
    ("mung_bean", 0.8),
    ("vegetables", 0.4),
    ("potatoes", 0.3),
    ("onion", 0.3),
    ("tomato", 0.4),
    ("brinjal", 0.4),
    ("okra", 0.4),
    ("cauliflower", 0.4),
    ("cabbage", 0.3),
    ("spinach", 0.3),
    ("pumpkin", 0.3),
    ("fruits", 0.4),
    ("mango", 0.4),
    ("banana", 0.3),
    ("jackfruit", 0.4),
    ("coconut", 0.4),
    ("papaya", 0.3),
    ("guava", 0.3),
    ("biryani", 3.5),
    ("chicken_biryani", 3.5),
    ("beef_biryani", 4.5),
    ("mutton_biryani", 4.0),
    ("kachchi_biryani", 4.0),
    ("polao", 2.5),
    ("khichuri", 1.8),
    ("tehari", 3.0),
    ("haleem", 3.5),
    ("curry", 2.5),
    ("chicken_curry", 2.5),
    ("beef_curry", 4.0),
    ("fish_curry", 1.8),
    ("dal_curry", 0.9),
    ("vegetable_curry", 0.6),
    ("fuchka", 0.3),
    ("chotpoti", 0.4),
    ("jhalmuri", 0.2),
    ("shingara", 0.3),
    ("paratha", 0.8),
    ("halim", 1.5),
    ("sweets", 2.0),
    ("rasgulla", 1.2),
    ("gulab_jamun", 1.5),
    ("sandesh", 1.0),
    ("roshogolla", 1.2),
    ("mishti_doi", 1.8),
    ("snacks", 1.5),
    ("tofu", 3.0),
    ("nuts", 0.3),
];

/// 能源（kWh / m³ / 升）
const ENERGY: FactorTable = &[
    ("electricity_grid", 0.493),
    ("electricity_bangladesh", 0.65),
    ("natural_gas", 2.07),
    ("heating_oil", 2.96),
    ("coal", 3.12),
];

/// 购物（kg CO₂ / 件）
const SHOPPING: FactorTable = &[
    ("clothing", 12.0),
    ("jeans", 33.4),
    ("shoes", 13.6),
    ("sari", 15.0),
    ("kurta", 8.0),
    ("sandals", 5.0),
    ("books", 2.8),
    ("toiletries", 1.2),
    ("soap", 0.5),
    ("shampoo", 0.8),
    ("toothpaste", 0.3),
    ("detergent", 1.5),
    ("packaging", 2.0),
    ("plastic_bags", 0.05),
    ("paper_bag", 0.02),
    ("jute_bag", 0.03),
    ("takeaway_container", 0.1),
    ("water_bottle", 0.2),
];

/// 生活方式（按小时 / 次 / 件）
///
/// 孟加拉电网按 0.65 kg/kWh 折算；light_bulb_hour 与 tv_hour 取通用平均值。
const LIFESTYLE: FactorTable = &[
    ("streaming_hour", 0.036),
    ("internet_gb", 0.014),
    ("email", 0.004),
    ("phone_call", 0.001),
    ("social_media", 0.002),
    ("laundry_load", 1.5),
    ("hand_wash_clothes", 0.1),
    ("shower_10min", 2.0),
    ("shower_cold", 0.1),
    ("bath", 5.0),
    ("bucket_bath", 0.5),
    ("cooking_gas", 0.5),
    ("cooking_electric", 0.3),
    ("fan_hour", 0.033),
    ("fan_energy_efficient", 0.020),
    ("ac_hour_1ton", 0.78),
    ("ac_hour_1.5ton", 1.17),
    ("ac_hour_2ton", 1.56),
    ("ac_hour", 0.78),
    ("refrigerator_small", 0.33),
    ("refrigerator_medium", 0.52),
    ("refrigerator_large", 0.78),
    ("led_bulb_7w", 0.005),
    ("led_bulb_12w", 0.008),
    ("cfl_bulb_15w", 0.010),
    ("light_bulb_hour", 0.02),
    ("tv_led_32", 0.033),
    ("tv_led_42plus", 0.052),
    ("tv_hour", 0.1),
    ("washing_machine_semi", 0.20),
    ("washing_machine_auto", 0.33),
    ("water_pump_submersible", 0.52),
    ("water_pump_surface", 0.39),
    ("electric_iron", 0.65),
    ("rice_cooker", 0.26),
    ("electric_kettle", 0.098),
    ("waste_kg", 0.5),
    ("newspaper", 0.3),
    ("magazine", 0.8),
    ("event_attendee", 5.0),
    ("wedding_attendee", 10.0),
    ("restaurant_meal", 3.0),
    ("takeaway_meal", 2.5),
    ("haircut", 0.5),
    ("ironing", 0.2),
    ("cleaning", 0.3),
];

/// 未知食物使用的平均因子
pub const DEFAULT_DIET_FACTOR: f64 = 5.0;

/// 可按乘客人数分摊排放的交通方式
const SHARED_MODES: [&str; 4] = ["car", "auto_rickshaw", "cng", "tuk_tuk"];

/// 获取某类别的因子表
pub fn factors(category: Category) -> FactorTable {
    match category {
        Category::Transport => TRANSPORT,
        Category::Diet => DIET,
        Category::Energy => ENERGY,
        Category::Shopping => SHOPPING,
        Category::Lifestyle => LIFESTYLE,
    }
}

/// 查找单个排放因子
pub fn factor(category: Category, activity: &str) -> Option<f64> {
    factors(category)
        .iter()
        .find(|(name, _)| *name == activity)
        .map(|(_, f)| *f)
}

// ==================== 分类别计算 ====================

pub fn calculate_transport(mode: &str, distance_km: f64, passengers: u32) -> f64 {
    transport_kg(mode, distance_km, f64::from(passengers))
}

/// 乘客数按原值参与分摊，metadata 中的非整数人数不截断
fn transport_kg(mode: &str, distance_km: f64, passengers: f64) -> f64 {
    let Some(f) = factor(Category::Transport, mode) else {
        return 0.0;
    };

    let mut carbon = f * distance_km;
    if SHARED_MODES.contains(&mode) && passengers > 1.0 {
        carbon /= passengers;
    }
    round_to(carbon, 2)
}

pub fn calculate_diet(meal_type: &str, quantity_kg: f64) -> f64 {
    let f = factor(Category::Diet, meal_type).unwrap_or(DEFAULT_DIET_FACTOR);
    round_to(f * quantity_kg, 2)
}

/// 能源计算
///
/// `unit` 仅用于记录，各能源的因子已按其常用单位给出。
pub fn calculate_energy(energy_type: &str, amount: f64, _unit: &str) -> f64 {
    factor(Category::Energy, energy_type)
        .map(|f| round_to(f * amount, 2))
        .unwrap_or(0.0)
}

pub fn calculate_shopping(item_type: &str, quantity: i64) -> f64 {
    shopping_kg(item_type, quantity as f64)
}

fn shopping_kg(item_type: &str, quantity: f64) -> f64 {
    factor(Category::Shopping, item_type)
        .map(|f| round_to(f * quantity, 2))
        .unwrap_or(0.0)
}

pub fn calculate_lifestyle(activity_type: &str, amount: f64, _unit: &str) -> f64 {
    factor(Category::Lifestyle, activity_type)
        .map(|f| round_to(f * amount, 2))
        .unwrap_or(0.0)
}

// ==================== 统一入口 ====================

/// 计算选项
#[derive(Debug, Clone, Default)]
pub struct CalcOptions {
    /// 乘客人数（仅交通），缺省为 1
    pub passengers: Option<u32>,
    /// 单位（能源缺省 kwh，生活方式缺省 item）
    pub unit: Option<String>,
}

/// 计算结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Calculation {
    pub carbon_amount_kg: f64,
    pub category: String,
    pub metadata: Value,
}

/// 按类别计算碳排放
///
/// 未知类别视为"其他"，直接取 `amount` 作为排放量。
pub fn calculate(category: &str, activity: &str, amount: f64, options: &CalcOptions) -> Calculation {
    let (carbon_amount_kg, metadata) = match Category::parse(category) {
        Some(Category::Transport) => {
            let passengers = options.passengers.unwrap_or(1);
            (
                calculate_transport(activity, amount, passengers),
                json!({ "mode": activity, "distance_km": amount, "passengers": passengers }),
            )
        }
        Some(Category::Diet) => (
            calculate_diet(activity, amount),
            json!({ "meal_type": activity, "quantity_kg": amount }),
        ),
        Some(Category::Energy) => {
            let unit = options.unit.as_deref().unwrap_or("kwh");
            (
                calculate_energy(activity, amount, unit),
                json!({ "energy_type": activity, "amount": amount, "unit": unit }),
            )
        }
        Some(Category::Shopping) => {
            let quantity = amount.trunc() as i64;
            (
                calculate_shopping(activity, quantity),
                json!({ "item_type": activity, "quantity": quantity }),
            )
        }
        Some(Category::Lifestyle) => {
            let unit = options.unit.as_deref().unwrap_or("item");
            (
                calculate_lifestyle(activity, amount, unit),
                json!({ "activity_type": activity, "amount": amount, "unit": unit }),
            )
        }
        None => (
            round_to(amount, 2),
            json!({ "activity": activity, "amount": amount }),
        ),
    };

    Calculation {
        carbon_amount_kg,
        category: category.to_string(),
        metadata,
    }
}

/// 根据日志 metadata 自动计算排放量
///
/// 创建日志时若未提供排放量，则从 metadata 中读取数量字段计算。
/// 数量与乘客数按原值参与计算，不做取整；未知类别返回 `None`，调用方保留原值。
pub fn calculate_from_metadata(category: &str, activity: &str, metadata: &Value) -> Option<f64> {
    let num = |key: &str, default: f64| metadata.get(key).and_then(Value::as_f64).unwrap_or(default);
    let text = |key: &str, default: &'static str| {
        metadata
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string())
    };

    let carbon = match Category::parse(category)? {
        Category::Transport => {
            transport_kg(activity, num("distance_km", 0.0), num("passengers", 1.0))
        }
        Category::Diet => calculate_diet(activity, num("quantity_kg", 0.0)),
        Category::Energy => calculate_energy(activity, num("amount", 0.0), &text("unit", "kwh")),
        Category::Shopping => shopping_kg(activity, num("quantity", 1.0)),
        Category::Lifestyle => {
            calculate_lifestyle(activity, num("amount", 0.0), &text("unit", "item"))
        }
    };
    Some(carbon)
}

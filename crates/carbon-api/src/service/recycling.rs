//! 回收点检索与回收提示

use std::cmp::Ordering;

use crate::dto::{NearbyRecyclingPoint, RecyclingTips};
use crate::models::RecyclingPoint;
use footprint::round_to;

/// 附近回收点最多返回条数
pub const MAX_NEARBY_POINTS: usize = 20;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// 两点间的大圆距离（公里）
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// 按距离筛选并排序
///
/// `waste_type` 不为空时只保留接收该类型的回收点
pub fn nearby(
    points: Vec<RecyclingPoint>,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
    waste_type: Option<&str>,
) -> Vec<NearbyRecyclingPoint> {
    let waste_type = waste_type.map(str::trim).filter(|t| !t.is_empty());

    let mut result: Vec<NearbyRecyclingPoint> = points
        .into_iter()
        .filter(|p| waste_type.is_none_or(|t| p.accepts(t)))
        .map(|point| {
            let distance = haversine_km(latitude, longitude, point.latitude, point.longitude);
            NearbyRecyclingPoint {
                point,
                distance_km: distance,
            }
        })
        .filter(|p| p.distance_km <= radius_km)
        .collect();

    result.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    result.truncate(MAX_NEARBY_POINTS);

    for p in &mut result {
        p.distance_km = round_to(p.distance_km, 2);
    }
    result
}

/// 按垃圾类型给出回收提示，未知类型返回通用提示
pub fn tips(waste_type: &str) -> RecyclingTips {
    let tips = match waste_type.to_ascii_lowercase().as_str() {
        "plastic" => vec![
            "Clean plastic containers before recycling",
            "Remove labels if possible",
            "Check if your local facility accepts this type of plastic",
            "Consider reusing containers when possible",
        ],
        "paper" => vec![
            "Keep paper dry and clean",
            "Remove any plastic or metal attachments",
            "Shred sensitive documents before recycling",
            "Compost small amounts at home if possible",
        ],
        "metal" => vec![
            "Remove any food residue",
            "Separate different types of metals",
            "Aluminum cans are highly recyclable",
            "Many scrap metal facilities pay for metals",
        ],
        "glass" => vec![
            "Remove lids and caps",
            "Rinse containers",
            "Do not include broken glass",
            "Glass can be recycled indefinitely",
        ],
        "organic" => vec![
            "Compost at home if possible",
            "Keep organic waste dry in collection",
            "No plastic bags in compost bins",
            "Large amounts can go to local composting facilities",
        ],
        "electronic" => vec![
            "Find local e-waste facilities",
            "Some retailers accept old electronics",
            "Remove batteries separately",
            "Wipe data before recycling devices",
        ],
        "textile" => vec![
            "Donate wearable clothing",
            "Many brands have take-back programs",
            "Clean items before donating",
            "Consider upcycling or repairing",
        ],
        _ => vec!["Check local recycling guidelines"],
    };

    RecyclingTips {
        waste_type: waste_type.to_string(),
        tips,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn point(name: &str, latitude: f64, longitude: f64, types: &[&str]) -> RecyclingPoint {
        let now = Utc::now();
        RecyclingPoint {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: "Somewhere".to_string(),
            latitude,
            longitude,
            waste_types_accepted: types.iter().map(|t| t.to_string()).collect(),
            opening_hours: None,
            phone: None,
            website: None,
            verified: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_haversine() {
        assert_eq!(haversine_km(23.8, 90.4, 23.8, 90.4), 0.0);
        // 赤道上 1 度经度约 111.19 公里
        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.19).abs() < 0.01);
    }

    #[test]
    fn test_nearby_filters_and_sorts() {
        let points = vec![
            point("far", 24.8, 90.4, &["plastic"]),
            point("mid", 23.85, 90.4, &["Plastic", "glass"]),
            point("near", 23.81, 90.4, &["paper"]),
            point("close-plastic", 23.805, 90.4, &["plastic"]),
        ];

        let all = nearby(points.clone(), 23.8, 90.4, 10.0, None);
        let names: Vec<&str> = all.iter().map(|p| p.point.name.as_str()).collect();
        assert_eq!(names, vec!["close-plastic", "near", "mid"]);

        let plastic = nearby(points, 23.8, 90.4, 10.0, Some("plastic"));
        let names: Vec<&str> = plastic.iter().map(|p| p.point.name.as_str()).collect();
        assert_eq!(names, vec!["close-plastic", "mid"]);
        assert_eq!(plastic[1].distance_km, 5.56);
    }

    #[test]
    fn test_nearby_caps_results() {
        let points: Vec<RecyclingPoint> = (0..30)
            .map(|i| point(&format!("p{i}"), 23.8 + i as f64 * 0.001, 90.4, &["metal"]))
            .collect();
        assert_eq!(nearby(points, 23.8, 90.4, 10.0, None).len(), MAX_NEARBY_POINTS);
    }

    #[test]
    fn test_tips() {
        let plastic = tips("plastic");
        assert_eq!(plastic.tips.len(), 4);
        assert_eq!(plastic.tips[0], "Clean plastic containers before recycling");

        let textile = tips("Textile");
        assert_eq!(textile.waste_type, "Textile");
        assert_eq!(textile.tips[3], "Consider upcycling or repairing");

        assert_eq!(tips("styrofoam").tips, vec!["Check local recycling guidelines"]);
    }
}

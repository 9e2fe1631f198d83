//! 饮食模式分析服务
//!
//! 扫描饮食描述中的不健康食物，给出健康替代建议（最多三条，去重）。

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::profile::DietAnalysis;

/// 不健康食物 → 健康替代建议
static HEALTHY_ALTERNATIVES: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        let mut map: HashMap<&str, &[&str]> = HashMap::new();
        map.insert("fries", &["baked sweet potato", "roasted vegetables"]);
        map.insert("soda", &["sparkling water with lemon", "unsweetened tea"]);
        map.insert("candy", &["fresh fruit", "a handful of nuts"]);
        map.insert("chips", &["air-popped popcorn", "carrot sticks"]);
        map.insert("burger", &["grilled chicken wrap", "veggie burger"]);
        map.insert("pizza", &["whole-grain flatbread with vegetables"]);
        map.insert("fried chicken", &["grilled chicken", "baked fish"]);
        map.insert("ice cream", &["frozen yogurt", "fruit smoothie"]);
        map.insert("cake", &["oatmeal with berries"]);
        map.insert("instant noodles", &["whole-grain noodles with vegetables"]);
        map
    });

/// 建议条数上限
const MAX_RECOMMENDATIONS: usize = 3;

/// 饮食模式分析器
#[derive(Debug, Clone, Default)]
pub struct DietAnalyzer;

impl DietAnalyzer {
    /// 创建分析器
    pub fn new() -> Self {
        Self
    }

    /// 分析一段饮食描述
    pub fn analyze(&self, text: &str) -> DietAnalysis {
        let text = text.to_lowercase();
        let mut unhealthy_found = Vec::new();
        let mut recommendations: Vec<String> = Vec::new();

        for (food, alternatives) in HEALTHY_ALTERNATIVES.iter() {
            if !text.contains(food) {
                continue;
            }
            unhealthy_found.push(food.to_string());
            for alt in alternatives.iter() {
                if !recommendations.iter().any(|r| r == alt) {
                    recommendations.push(alt.to_string());
                }
            }
        }

        // HashMap 遍历无序，排序保证结果确定
        unhealthy_found.sort();
        recommendations.sort();
        recommendations.truncate(MAX_RECOMMENDATIONS);

        DietAnalysis {
            unhealthy_foods: unhealthy_found,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_unhealthy_foods() {
        let analyzer = DietAnalyzer::new();
        let analysis = analyzer.analyze("I had fries and soda for lunch");
        assert_eq!(analysis.unhealthy_foods, vec!["fries", "soda"]);
        assert!(!analysis.recommendations.is_empty());
    }

    #[test]
    fn test_recommendations_capped_at_three() {
        let analyzer = DietAnalyzer::new();
        let analysis = analyzer.analyze("fries, soda, candy, chips, burger and pizza");
        assert!(analysis.recommendations.len() <= 3);
    }

    #[test]
    fn test_healthy_diet_yields_empty_analysis() {
        let analyzer = DietAnalyzer::new();
        let analysis = analyzer.analyze("salad with grilled salmon and water");
        assert!(analysis.unhealthy_foods.is_empty());
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let analyzer = DietAnalyzer::new();
        let a = analyzer.analyze("fries and soda and candy");
        let b = analyzer.analyze("fries and soda and candy");
        assert_eq!(a.unhealthy_foods, b.unhealthy_foods);
        assert_eq!(a.recommendations, b.recommendations);
    }
}

//! Menu Model

use super::serde_helpers::{null_as_zero, string_or_number};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 菜品分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Western,
    Chinese,
    Coffee,
    Drink,
    Snack,
}

impl CategoryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Western => "western",
            Self::Chinese => "chinese",
            Self::Coffee => "coffee",
            Self::Drink => "drink",
            Self::Snack => "snack",
        }
    }

    /// 解析 `?cat=` 参数，未知值返回 None
    pub fn parse(value: &str) -> Option<Self> {
        CATEGORIES
            .iter()
            .map(|c| c.key)
            .find(|k| k.as_str() == value)
    }

    pub fn info(&self) -> &'static Category {
        // CATEGORIES 覆盖所有枚举值
        CATEGORIES
            .iter()
            .find(|c| c.key == *self)
            .unwrap_or(&CATEGORIES[0])
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分类展示信息 (侧边栏)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: CategoryKey,
    pub label: &'static str,
    pub icon: &'static str,
}

/// 分类列表，顺序即侧边栏顺序；第一个为默认分类
pub const CATEGORIES: [Category; 5] = [
    Category {
        key: CategoryKey::Western,
        label: "Western Bakery",
        icon: "🍞",
    },
    Category {
        key: CategoryKey::Chinese,
        label: "Chinese Dim Sum",
        icon: "🥟",
    },
    Category {
        key: CategoryKey::Coffee,
        label: "Coffee",
        icon: "☕️",
    },
    Category {
        key: CategoryKey::Drink,
        label: "Milk & Drinks",
        icon: "🥛",
    },
    Category {
        key: CategoryKey::Snack,
        label: "Pastries",
        icon: "🍩",
    },
];

/// 菜品 (`menu_items` 表)
///
/// 价格为最小货币单位整数 (JPY)。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub cat: CategoryKey,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// 出餐时间描述，如 "5-8 min"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
}

impl MenuItem {
    /// 名称或描述包含关键字 (调用方负责小写化)
    pub fn matches_keyword(&self, lowercase_keyword: &str) -> bool {
        self.name.to_lowercase().contains(lowercase_keyword)
            || self
                .desc
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(lowercase_keyword)
    }
}

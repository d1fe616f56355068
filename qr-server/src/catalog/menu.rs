//! Built-in menu, served when no backend is configured or `menu_items` can't be read

use shared::models::{CategoryKey, MenuItem};
use std::sync::LazyLock;

struct Seed {
    id: &'static str,
    cat: CategoryKey,
    name: &'static str,
    price: i64,
    sold: i64,
    desc: &'static str,
    img: &'static str,
    calories: i64,
    rating: f64,
    time: &'static str,
    ingredients: &'static [&'static str],
}

const SEEDS: [Seed; 6] = [
    Seed {
        id: "1",
        cat: CategoryKey::Chinese,
        name: "Youtiao",
        price: 420,
        sold: 38,
        desc: "Crispy outside, soft inside",
        img: "/images/youtiao.jpg",
        calories: 190,
        rating: 4.6,
        time: "15-20 min",
        ingredients: &["Pork filling", "Flour", "Scallion"],
    },
    Seed {
        id: "2",
        cat: CategoryKey::Chinese,
        name: "Xiaolongbao",
        price: 520,
        sold: 12,
        desc: "Bursting with soup",
        img: "/images/xiaolongbao.jpg",
        calories: 230,
        rating: 4.7,
        time: "12-18 min",
        ingredients: &["Fresh pork", "Flour", "Ginger"],
    },
    Seed {
        id: "3",
        cat: CategoryKey::Western,
        name: "Croissant",
        price: 360,
        sold: 25,
        desc: "Buttery",
        img: "https://images.unsplash.com/photo-1549931319-a545dcf3bc73?w=800&q=80&auto=format&fit=crop",
        calories: 280,
        rating: 4.5,
        time: "8-12 min",
        ingredients: &["Butter", "Flour", "Milk"],
    },
    Seed {
        id: "4",
        cat: CategoryKey::Coffee,
        name: "Latte",
        price: 480,
        sold: 19,
        desc: "Smooth and milky",
        img: "https://images.unsplash.com/photo-1511920170033-f8396924c348?w=800&q=80&auto=format&fit=crop",
        calories: 160,
        rating: 4.4,
        time: "5-8 min",
        ingredients: &["Coffee", "Milk"],
    },
    Seed {
        id: "5",
        cat: CategoryKey::Drink,
        name: "Fresh milk",
        price: 280,
        sold: 9,
        desc: "Best served cold",
        img: "https://images.unsplash.com/photo-1550583724-b2692b85b150?w=800&q=80&auto=format&fit=crop",
        calories: 120,
        rating: 4.3,
        time: "3-5 min",
        ingredients: &["Fresh milk"],
    },
    Seed {
        id: "6",
        cat: CategoryKey::Snack,
        name: "Donut",
        price: 330,
        sold: 14,
        desc: "An energy boost",
        img: "https://images.unsplash.com/photo-1551024601-bec78aea704b?w=800&q=80&auto=format&fit=crop",
        calories: 260,
        rating: 4.2,
        time: "8-10 min",
        ingredients: &["Flour", "Icing"],
    },
];

impl From<&Seed> for MenuItem {
    fn from(seed: &Seed) -> Self {
        Self {
            id: seed.id.to_string(),
            cat: seed.cat,
            name: seed.name.to_string(),
            price: seed.price,
            sold: Some(seed.sold),
            desc: Some(seed.desc.to_string()),
            img: Some(seed.img.to_string()),
            calories: Some(seed.calories),
            rating: Some(seed.rating),
            time: Some(seed.time.to_string()),
            ingredients: Some(seed.ingredients.iter().map(|s| s.to_string()).collect()),
        }
    }
}

/// 内置菜单 (6 items)
pub static MENU: LazyLock<Vec<MenuItem>> = LazyLock::new(|| SEEDS.iter().map(MenuItem::from).collect());

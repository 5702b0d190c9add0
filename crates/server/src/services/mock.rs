//! Mock catalog data used whenever the commerce API is unreachable or the
//! tenant is unauthenticated.
//!
//! Identifiers and names are deterministic in `(category, page, index)`;
//! prices, ratings, stock flags and review counts come from the injected
//! `Rng` so tests can seed them.

use rand::Rng;
use rust_decimal::Decimal;

use product_grid_core::{Category, Product};

/// Fixed fallback category set returned when collections cannot be fetched.
#[must_use]
pub fn fallback_categories() -> Vec<Category> {
    vec![
        Category::new("bestSelling", "Mais Vendidos", "best-selling"),
        Category::new("newest", "Novidades", "newest"),
        Category::new("featured", "Em Destaque", "featured"),
        Category::new("sale", "Promoções", "sale"),
        Category::new("electronics", "Eletrônicos", "electronics"),
        Category::new("clothing", "Roupas", "clothing"),
        Category::new("home", "Casa e Decoração", "home"),
        Category::new("sports", "Esportes", "sports"),
    ]
}

/// Base product names per category; unknown categories use the default list.
fn base_names(category: &str) -> &'static [&'static str] {
    match category {
        "newest" => &["Smartwatch Ultra", "Câmera 4K", "Tablet Gaming"],
        "featured" => &["Console Next-Gen", "Monitor 4K", "Teclado Mecânico"],
        "sale" => &["Mouse Gamer", "WebCam HD", "Carregador Wireless"],
        "electronics" => &["TV Smart 55\"", "SoundBar Premium", "Roteador WiFi 6"],
        "clothing" => &["Camiseta Tech", "Jaqueta Sport", "Tênis Confort"],
        "home" => &["Cafeteira Automática", "Aspirador Robot", "Ar Condicionado"],
        "sports" => &["Bicicleta Mountain", "Esteira Elétrica", "Kit Academia"],
        // "bestSelling" and everything unknown
        _ => &["Smartphone Pro Max", "Notebook Gamer", "Headphone Bluetooth"],
    }
}

/// Generate one page of mock products.
///
/// Ids have the form `{category}-{page}-{index}` for index in `[0, limit)`;
/// the base name list wraps across pages so every page is populated.
pub fn mock_products(
    category: &str,
    limit: u32,
    page: u32,
    rng: &mut impl Rng,
) -> Vec<Product> {
    let names = base_names(category);
    let page = page.max(1);

    (0..limit)
        .map(|i| {
            let name_index = ((page - 1) * limit + i) as usize % names.len();
            let base = names[name_index];

            Product {
                id: format!("{category}-{page}-{i}"),
                name: format!("{base} {}", i + 1),
                price: Decimal::new(rng.random_range(5000..55000), 2),
                image: Some(format!(
                    "https://picsum.photos/300/300?random={}",
                    rng.random::<u32>()
                )),
                url: Some(format!("#produto-{category}-{i}")),
                category: category.to_string(),
                in_stock: rng.random_bool(0.9),
                rating: Some(f64::from(rng.random_range(30_u32..=50)) / 10.0),
                reviews: Some(rng.random_range(0_u32..500)),
                description: Some(format!(
                    "{base} com as melhores especificações do mercado."
                )),
            }
        })
        .collect()
}

//! Local product enhancement generator.
//!
//! Produces the short marketing phrase attached to a product card. The
//! `local` provider picks from a fixed template list; anything else gets the
//! generic phrase (external providers are not wired up). Plan gating happens
//! in the route handler.

use rand::Rng;
use serde::Deserialize;

use product_grid_core::TenantSettings;

/// Upsell message shown to tenants whose plan has no AI enhancement.
pub const UPSELL_MESSAGE: &str = "🔒 Upgrade para Pro para recomendações IA avançadas";

/// Phrase returned when enhancement generation fails.
pub const FALLBACK_MESSAGE: &str = "Produto em destaque com ótimo custo-benefício!";

/// Phrase returned for providers other than `local`.
const GENERIC_MESSAGE: &str = "Produto recomendado pela IA";

/// The product fields the templates reference. Deliberately lenient: the
/// widget posts whatever card data it has.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnhanceProduct {
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
    pub category: Option<String>,
}

/// Generate an enhancement phrase for a product.
pub fn enhancement(
    product: &EnhanceProduct,
    settings: &TenantSettings,
    rng: &mut impl Rng,
) -> String {
    if settings.ai_provider != "local" {
        return GENERIC_MESSAGE.to_string();
    }

    let rating = product.rating.unwrap_or(4.5);
    let reviews = product.reviews.unwrap_or(100);
    let category = product.category.as_deref().unwrap_or("produtos");

    let templates = [
        format!("Produto com {rating}⭐ de avaliação!"),
        format!("Mais de {reviews} clientes satisfeitos"),
        format!("Melhor custo-benefício da categoria {category}"),
        "Entrega rápida e garantia estendida".to_string(),
        "Produto em alta demanda - últimas unidades!".to_string(),
        "Ideal para quem busca qualidade e economia".to_string(),
        "Tecnologia de ponta com preço acessível".to_string(),
        "Recomendado por especialistas da área".to_string(),
    ];

    let index = rng.random_range(0..templates.len());
    templates[index].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn product() -> EnhanceProduct {
        EnhanceProduct {
            rating: Some(4.8),
            reviews: Some(321),
            category: Some("electronics".to_string()),
        }
    }

    #[test]
    fn test_local_provider_uses_template_list() {
        let settings = TenantSettings::default();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..32 {
            let phrase = enhancement(&product(), &settings, &mut rng);
            assert_ne!(phrase, GENERIC_MESSAGE);
            assert_ne!(phrase, UPSELL_MESSAGE);
        }
    }

    #[test]
    fn test_templates_reference_product_fields() {
        let settings = TenantSettings::default();
        let mut rng = StdRng::seed_from_u64(0);

        // Sample enough phrases to hit the parameterized templates
        let phrases: Vec<String> = (0..64)
            .map(|_| enhancement(&product(), &settings, &mut rng))
            .collect();
        assert!(phrases.iter().any(|p| p.contains("4.8")));
        assert!(phrases.iter().any(|p| p.contains("321")));
        assert!(phrases.iter().any(|p| p.contains("electronics")));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = TenantSettings::default();
        let mut rng = StdRng::seed_from_u64(3);

        let phrases: Vec<String> = (0..64)
            .map(|_| enhancement(&EnhanceProduct::default(), &settings, &mut rng))
            .collect();
        assert!(phrases.iter().any(|p| p.contains("4.5")));
        assert!(phrases.iter().any(|p| p.contains("100")));
    }

    #[test]
    fn test_non_local_provider_gets_generic_phrase() {
        let settings = TenantSettings {
            ai_provider: "openai".to_string(),
            ..TenantSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(enhancement(&product(), &settings, &mut rng), GENERIC_MESSAGE);
    }
}

use anyhow::Result;
use chrono::Utc;

use crate::model::{generate_id, Category, Product, DEFAULT_MATERIAL};
use crate::store::traits::{CategoryStore, ProductStore, Store};

fn demo_category(name: &str, slug: &str, description: &str, sort_order: i32) -> Category {
    Category {
        id: generate_id(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: Some(description.to_string()),
        main_image: String::new(),
        sort_order,
        is_published: true,
        created_at: Utc::now(),
    }
}

fn demo_product(
    category_id: &str,
    title: &str,
    slug: &str,
    sku: &str,
    technical_specs: &str,
) -> Product {
    Product {
        id: generate_id(),
        category_id: category_id.to_string(),
        title: title.to_string(),
        slug: slug.to_string(),
        sku: sku.to_string(),
        material: DEFAULT_MATERIAL.to_string(),
        description: format!("Precision-machined {} in mirror-polished finish.", title.to_lowercase()),
        technical_specs: technical_specs.to_string(),
        images: Vec::new(),
        is_published: true,
        created_at: Utc::now(),
    }
}

/// Load a small demonstration catalog so a fresh instance has content.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<()> {
    let clasps = demo_category("Clasps", "clasps", "Spring rings, lobster claws and toggles.", 0);
    let chains = demo_category("Chains", "chains", "Cable, curb and rope chain by the meter.", 1);

    let products = vec![
        demo_product(
            &clasps.id,
            "Lobster Clasp 12mm",
            "lobster-clasp-12mm",
            "LC-316-12",
            r#"[{"label":"Grade","value":"316L"},{"label":"Length","value":"12 mm"}]"#,
        ),
        demo_product(
            &clasps.id,
            "Spring Ring 8mm",
            "spring-ring-8mm",
            "SR-316-08",
            "",
        ),
        demo_product(
            &chains.id,
            "Curb Chain 3mm",
            "curb-chain-3mm",
            "CC-316-03",
            r#"[{"label":"Grade","value":"316L"},{"label":"Width","value":"3 mm"}]"#,
        ),
    ];

    store.insert_category(clasps).await?;
    store.insert_category(chains).await?;
    for product in products {
        store.insert_product(product).await?;
    }

    Ok(())
}

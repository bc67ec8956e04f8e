use anyhow::Result;

use crate::model::{Category, Product, ProductDetail};
use crate::store::traits::{CategoryStore, ProductStore};

/// Published categories in public display order.
pub async fn published_categories<S: CategoryStore>(store: &S) -> Result<Vec<Category>> {
    store.list_published_categories().await
}

/// Resolve a published category by slug together with its published
/// products. `None` means "not found", which the page renders as such; it
/// is never an error.
pub async fn category_with_products<S: CategoryStore + ProductStore>(
    store: &S,
    slug: &str,
) -> Result<Option<(Category, Vec<Product>)>> {
    let Some(category) = store.get_published_category_by_slug(slug).await? else {
        return Ok(None);
    };

    let products = store
        .list_published_products_for_category(&category.id)
        .await?;

    Ok(Some((category, products)))
}

/// Product detail by slug with the parent category for the breadcrumb and
/// the parsed spec rows. `None` is the terminal "Product Not Found" state.
pub async fn product_detail<S: ProductStore>(
    store: &S,
    slug: &str,
) -> Result<Option<ProductDetail>> {
    let Some((product, category)) = store.get_product_detail_by_slug(slug).await? else {
        return Ok(None);
    };

    let specs = product.technical_spec_rows();
    Ok(Some(ProductDetail {
        product,
        category_name: category.name,
        category_slug: category.slug,
        specs,
    }))
}

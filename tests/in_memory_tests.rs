//! End-to-end tests of catalog list views over InMemoryDataSource
//!
//! These tests verify that:
//! - Catalog presets drive sorting and column mapping
//! - Filters are AND-ed and reset the page
//! - Laravel-style metadata from the source is normalized
//! - Exports see the whole filtered result without moving the view

use chrono::{Duration, TimeZone, Utc};
use listview::prelude::*;
use serde_json::json;

fn product(id: u64) -> Product {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(id as i64);
    Product {
        id,
        name: format!("Product {}", id),
        slug: format!("product-{}", id),
        description: None,
        sku: Some(format!("SKU-{:04}", id)),
        price: id as f64,
        sale_price: None,
        quantity: 10,
        status: "publish".to_string(),
        product_type: Some(if id % 2 == 0 { "grocery" } else { "bakery" }.to_string()),
        categories: vec![if id % 3 == 0 { "fruits" } else { "bread" }.to_string()],
        image: None,
        language: "en".to_string(),
        created_at: created,
        updated_at: created,
    }
}

fn products() -> InMemoryDataSource<Product> {
    InMemoryDataSource::new((1..=45).map(product).collect()).with_search_filters([SEARCH_FILTER])
}

fn ids(items: &[Product]) -> Vec<u64> {
    items.iter().map(|p| p.id).collect()
}

fn product_view(
    config: ListViewConfig,
) -> ListController<Product, InMemoryDataSource<Product>> {
    ListController::new(config, products()).unwrap()
}

// =============================================================================
// Products
// =============================================================================

mod product_tests {
    use super::*;

    #[tokio::test]
    async fn test_first_page_newest_first() {
        let view = product_view(Product::list_view_config());
        view.refresh().await.unwrap();

        let state = view.snapshot();
        assert_eq!(ids(&state.items)[..3], [45, 44, 43]);
        assert_eq!(state.items.len(), 20);

        let meta = state.paginator.unwrap();
        assert_eq!(meta, NormalizedPaginatorInfo::new(45, 1, 20));
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next());
        assert!(!meta.has_prev());
        assert!(state.show_pagination());
        assert_eq!(
            state.sort_indicator("created"),
            SortIndicator { active: true, ascending: false }
        );
    }

    #[tokio::test]
    async fn test_last_page_is_partial() {
        let view = product_view(Product::list_view_config());
        view.go_to_page(3);
        view.refresh().await.unwrap();

        assert_eq!(ids(&view.items()), vec![5, 4, 3, 2, 1]);
        let meta = view.paginator().unwrap();
        assert_eq!(meta.item_range(), Some((41, 45)));
        assert!(!meta.has_next());
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let view = product_view(Product::list_view_config());
        view.go_to_page(9);
        view.refresh().await.unwrap();

        let state = view.snapshot();
        assert!(state.is_empty());
        let meta = state.paginator.unwrap();
        assert_eq!(meta.current_page, 9);
        assert_eq!(meta.total, 45);
        assert_eq!(meta.item_range(), None);
    }

    #[tokio::test]
    async fn test_price_sort_toggle() {
        let view = product_view(Product::list_view_config());

        view.toggle_sort("price");
        view.refresh().await.unwrap();
        assert_eq!(ids(&view.items())[0], 45);

        view.toggle_sort("price");
        view.refresh().await.unwrap();
        assert_eq!(ids(&view.items())[..3], [1, 2, 3]);
        assert_eq!(view.applied_query().unwrap().sort_expression().as_deref(), Some("price:asc"));
    }

    #[tokio::test]
    async fn test_category_filter_resets_page() {
        let view = product_view(Product::list_view_config());
        view.go_to_page(2);
        view.refresh().await.unwrap();

        let query = view.set_filter(CATEGORY_FILTER, Some("fruits")).unwrap();
        assert_eq!(query.page, 1);
        view.refresh().await.unwrap();

        let meta = view.paginator().unwrap();
        assert_eq!(meta.total, 15);
        assert!(view.items().iter().all(|p| p.id % 3 == 0));
    }

    #[tokio::test]
    async fn test_filters_are_anded() {
        let view = product_view(Product::list_view_config());
        view.set_filter(CATEGORY_FILTER, Some("fruits"));
        view.set_filter(TYPE_FILTER, Some("grocery"));
        view.refresh().await.unwrap();

        assert_eq!(ids(&view.items()), vec![42, 36, 30, 24, 18, 12, 6]);
        assert!(!view.paginator().unwrap().has_next());
    }

    #[tokio::test]
    async fn test_search_is_substring_and_case_insensitive() {
        let view = product_view(Product::list_view_config());
        view.set_filter(SEARCH_FILTER, Some("PRODUCT 1"));
        view.refresh().await.unwrap();
        assert_eq!(view.paginator().unwrap().total, 11);

        view.set_filter(SEARCH_FILTER, Some("   "));
        view.refresh().await.unwrap();
        assert_eq!(view.paginator().unwrap().total, 45);
        assert!(view.applied_query().unwrap().filter(SEARCH_FILTER).is_none());
    }

    #[tokio::test]
    async fn test_locale_scopes_rows() {
        let view = product_view(localized::<Product>("de"));
        view.refresh().await.unwrap();

        let state = view.snapshot();
        assert!(state.is_empty());
        assert!(!state.show_pagination());
        assert_eq!(state.filters.get(LOCALE_FILTER), Some("de"));
    }

    #[tokio::test]
    async fn test_export_reads_whole_result() {
        let view = product_view(Product::list_view_config());
        view.set_filter(CATEGORY_FILTER, Some("fruits"));
        view.go_to_page(2);
        view.refresh().await.unwrap();
        let visible = view.items();

        let export = view
            .fetch_once(&QueryOverrides::new().page(1).page_size(1000))
            .await
            .unwrap();
        assert_eq!(export.items.len(), 15);
        assert_eq!(export.paginator.total_pages, 1);
        assert_eq!(export.query.filter(CATEGORY_FILTER), Some("fruits"));

        assert_eq!(view.items(), visible);
        assert_eq!(view.page_request().page, 2);
    }

    #[tokio::test]
    async fn test_inserted_rows_show_on_refresh() {
        let source = products();
        let view =
            ListController::<Product, _>::new(Product::list_view_config(), source.clone()).unwrap();

        source.insert(product(46)).unwrap();
        view.refresh().await.unwrap();
        assert_eq!(ids(&view.items())[0], 46);
        assert_eq!(view.paginator().unwrap().total_pages, 3);
    }
}

// =============================================================================
// Categories and types
// =============================================================================

mod taxonomy_tests {
    use super::*;

    fn categories() -> Vec<Category> {
        serde_json::from_value(json!([
            {
                "id": 1, "name": "Fruits & Vegetables", "slug": "fruits-vegetables",
                "icon": "FruitsVegetable", "type": "grocery", "language": "en",
                "children": [{
                    "id": 4, "name": "Fruits", "slug": "fruits", "type": "grocery",
                    "parent": 1, "language": "en"
                }]
            },
            {
                "id": 2, "name": "Bread", "slug": "bread", "icon": "Bakery",
                "type": "bakery", "language": "en"
            },
            { "id": 3, "name": "Snacks", "slug": "snacks", "type": "grocery", "language": "en" }
        ]))
        .unwrap()
    }

    #[tokio::test]
    async fn test_category_type_filter() {
        let source = InMemoryDataSource::new(categories()).with_search_filters([SEARCH_FILTER]);
        let view =
            ListController::<Category, _>::new(Category::list_view_config(), source).unwrap();

        view.set_filter(TYPE_FILTER, Some("grocery"));
        view.refresh().await.unwrap();

        let names: Vec<_> = view.items().into_iter().map(|c| c.name).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Snacks".to_string()));
        assert!(view.items().iter().any(Category::is_expandable));
    }

    #[tokio::test]
    async fn test_category_name_sort() {
        let source = InMemoryDataSource::new(categories());
        let view =
            ListController::<Category, _>::new(Category::list_view_config(), source).unwrap();

        view.toggle_sort("name");
        view.toggle_sort("name");
        view.refresh().await.unwrap();

        let names: Vec<_> = view.items().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Bread", "Fruits & Vegetables", "Snacks"]);
    }

    #[tokio::test]
    async fn test_icons_resolve_per_row() {
        let icons: IconRegistry =
            [("FruitsVegetable", "M1 1"), ("Bakery", "M2 2")].into_iter().collect();
        let source = InMemoryDataSource::new(categories());
        let view =
            ListController::<Category, _>::new(Category::list_view_config(), source).unwrap();
        view.refresh().await.unwrap();

        let resolved: Vec<_> = view
            .items()
            .iter()
            .map(|c| icons.resolve(c.icon_name()).map(|i| i.source.clone()))
            .collect();
        assert_eq!(resolved.iter().filter(|r| r.is_some()).count(), 2);
        assert!(resolved.contains(&None));
    }

    #[tokio::test]
    async fn test_types_view_rtl() {
        let types: Vec<ProductType> = serde_json::from_value(json!([
            {
                "id": 1, "name": "Grocery", "slug": "grocery", "icon": "FruitsVegetable",
                "language": "ar",
                "images": [{ "image": [{ "id": 10, "thumbnail": "t.jpg", "original": "o.jpg" }] }]
            },
            { "id": 2, "name": "Bakery", "slug": "bakery", "language": "en" }
        ]))
        .unwrap();

        let config = localized::<ProductType>("ar").with_text_direction(TextDirection::Rtl);
        let view =
            ListController::<ProductType, _>::new(config, InMemoryDataSource::new(types)).unwrap();
        view.refresh().await.unwrap();

        let state = view.snapshot();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].attachments().count(), 1);
        assert_eq!(state.text_direction.align_start(), Alignment::Right);
        assert_eq!(state.text_direction.align_end(), Alignment::Left);
    }
}

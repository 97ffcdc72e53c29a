use nivasa_backend::db::models::api::{PageParams, Paged, Pagination};

#[test]
fn second_page_of_twenty_five() {
    let params = PageParams::new(Some(2), Some(10));
    assert_eq!(params.offset(), 10);

    let page = Paged {
        items: (10..20).collect::<Vec<i32>>(),
        total: 25,
        params,
    };
    let pagination = page.pagination();

    assert_eq!(page.items.len(), 10);
    assert_eq!(pagination.total_pages, 3);
    assert!(pagination.has_next);
    assert!(pagination.has_prev);
}

#[test]
fn page_params_are_clamped() {
    let params = PageParams::new(Some(0), Some(1000));
    assert_eq!(params.page, 1);
    assert_eq!(params.limit, PageParams::MAX_LIMIT);

    let defaults = PageParams::new(None, None);
    assert_eq!(defaults.limit, PageParams::DEFAULT_LIMIT);
    assert_eq!(defaults.offset(), 0);
}

#[test]
fn empty_collection_has_no_pages() {
    let pagination = Pagination::new(1, 10, 0);
    assert_eq!(pagination.total_pages, 0);
    assert!(!pagination.has_next);
    assert!(!pagination.has_prev);
}

#[test]
fn out_of_range_page_yields_an_empty_page_not_an_overflow() {
    let params = PageParams::new(Some(i64::MAX), Some(10));
    assert_eq!(params.page, PageParams::MAX_PAGE);
    assert_eq!(params.offset(), (PageParams::MAX_PAGE - 1) * 10);
}

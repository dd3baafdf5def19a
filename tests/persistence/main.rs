//! Products kept in a file-backed store survive reopening.

use rust_decimal::Decimal;
use stockroom::{
    FileRecordStore, Photo, ProductFields, ProductRepository, Stockroom, StockroomConfig,
    StoreLocation,
};

fn config(path: &std::path::Path) -> StockroomConfig {
    StockroomConfig::default().with_store(StoreLocation::File(path.to_path_buf()))
}

#[test]
fn products_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockroom.db");

    let (kept, photo) = {
        let stockroom = Stockroom::open(&config(&path)).unwrap();

        let mut form = stockroom.new_product_form();
        form.set_name("Widget");
        form.set_price(Decimal::new(4500, 2));
        form.set_stock(12);
        form.attach_photo(vec![0xffu8, 0xd8, 0xff]);
        let kept = form.save().unwrap();

        let mut form = stockroom.new_product_form();
        form.set_name("Gadget");
        form.save().unwrap();

        let mut list = stockroom.product_list().unwrap();
        list.swipe_delete(1).unwrap();

        (kept, Photo::new(vec![0xff, 0xd8, 0xff]))
    };

    let reopened = Stockroom::open(&config(&path)).unwrap();
    let all = reopened.repository().list_all().unwrap();

    assert_eq!(all, vec![kept.clone()]);
    assert_eq!(all[0].photos(), &[photo]);
    assert_eq!(all[0].price(), Decimal::new(4500, 2));
}

#[test]
fn repository_over_file_store_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockroom.db");

    let names = ["delta", "alpha", "charlie"];
    {
        let repo = stockroom::StoreProductRepository::new(FileRecordStore::open(&path).unwrap());
        for name in names {
            repo.create(ProductFields {
                name: name.into(),
                ..ProductFields::default()
            })
            .unwrap();
        }
    }

    let repo = stockroom::StoreProductRepository::new(FileRecordStore::open(&path).unwrap());
    let listed: Vec<String> = repo
        .list_all()
        .unwrap()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(listed, names);
}

#[test]
fn failed_save_can_be_retried_without_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockroom.db");
    let stockroom = Stockroom::open(&config(&path)).unwrap();

    let blocker = path.with_extension("tmp");
    std::fs::create_dir(&blocker).unwrap();

    let mut form = stockroom.new_product_form();
    form.set_name("Widget");
    let rejected = form.save().unwrap_err();
    assert!(matches!(rejected.error(), stockroom::FormError::Repository(_)));
    assert!(stockroom.repository().list_all().unwrap().is_empty());

    std::fs::remove_dir(&blocker).unwrap();
    let saved = rejected.into_form().save().unwrap();

    assert_eq!(stockroom.repository().list_all().unwrap(), vec![saved]);
}

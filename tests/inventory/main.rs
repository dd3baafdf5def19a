//! End-to-end flows through the list and form controllers.


use rust_decimal::Decimal;
use stockroom::{
    ChangeEvent, FormError, ListMode, Photo, ProductId, ProductRepository, ValidationError,
};
use support::{fields, stockroom};

#[test]
fn saved_form_shows_up_in_list() {
    let stockroom = stockroom();
    let mut list = stockroom.product_list().unwrap();

    let mut form = stockroom.new_product_form();
    form.set_name("Widget");
    form.set_price(Decimal::new(1250, 2));
    form.increment_stock(10);
    form.decrement_stock(1);
    form.set_description("steel, 5cm");
    form.attach_photo(vec![0x89u8, 0x50]);
    let draft = form.draft().clone();
    let saved = form.save().unwrap();

    assert!(list.refresh().unwrap());
    let listed = list.products();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), saved.id());
    assert_eq!(listed[0].fields(), &draft);
    assert_eq!(listed[0].stock(), 9);
}

#[test]
fn empty_name_never_reaches_the_store() {
    let stockroom = stockroom();
    stockroom.repository().create(fields("existing")).unwrap();

    let mut form = stockroom.new_product_form();
    form.set_price(Decimal::new(100, 2));
    let rejected = form.save().unwrap_err();

    assert!(matches!(
        rejected.error(),
        FormError::Validation(ValidationError::EmptyName)
    ));
    assert_eq!(rejected.to_string(), "save rejected: Product name cannot be empty.");
    assert_eq!(stockroom.repository().list_all().unwrap().len(), 1);
}

#[test]
fn editing_keeps_identity_and_position() {
    let stockroom = stockroom();
    let repo = stockroom.repository();
    let first = repo.create(fields("first")).unwrap();
    let second = repo.create(fields("second")).unwrap();

    let mut form = stockroom.edit_product_form(&first);
    form.set_name("first, renamed");
    form.attach_photo(Photo::new(vec![1, 2]));
    form.save().unwrap();

    let all = repo.list_all().unwrap();
    let ids: Vec<ProductId> = all.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
    assert_eq!(all[0].name(), "first, renamed");
    assert_eq!(all[0].created_at(), first.created_at());
    assert_eq!(all[0].photos().len(), 1);
}

#[test]
fn search_then_batch_delete() {
    let stockroom = stockroom();
    let repo = stockroom.repository();
    let widget = repo.create(fields("Widget")).unwrap();
    let gadget = repo.create(fields("Gadget")).unwrap();
    let widget_pro = repo.create(fields("widget pro")).unwrap();

    let mut list = stockroom.product_list().unwrap();
    list.set_query("widget");
    let visible: Vec<ProductId> = list.visible().iter().map(|p| p.id()).collect();
    assert_eq!(visible, vec![widget.id(), widget_pro.id()]);

    list.toggle_edit_mode();
    for id in visible {
        assert!(list.select(id));
    }
    assert_eq!(list.batch_delete().unwrap(), 2);

    assert_eq!(list.mode(), ListMode::Browsing);
    assert!(list.selection().is_empty());
    assert!(list.visible().is_empty());
    let remaining: Vec<ProductId> = repo.list_all().unwrap().iter().map(|p| p.id()).collect();
    assert_eq!(remaining, vec![gadget.id()]);
}

#[test]
fn batch_delete_skips_products_deleted_elsewhere() {
    let stockroom = stockroom();
    let repo = stockroom.repository();
    let a = repo.create(fields("a")).unwrap();
    let b = repo.create(fields("b")).unwrap();
    let c = repo.create(fields("c")).unwrap();

    let mut list = stockroom.product_list().unwrap();
    list.toggle_edit_mode();
    list.select(a.id());
    list.select(b.id());

    // Another handle removes one of the selected products without the list refreshing.
    repo.delete(a.id()).unwrap();

    list.batch_delete().unwrap();
    let remaining: Vec<ProductId> = repo.list_all().unwrap().iter().map(|p| p.id()).collect();
    assert_eq!(remaining, vec![c.id()]);
}

#[test]
fn list_sees_changes_from_forms() {
    let stockroom = stockroom();
    let events = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = std::sync::Arc::clone(&events);
    stockroom
        .repository()
        .subscribe(move |event: &ChangeEvent| sink.lock().unwrap().push(event.clone()));

    let mut list = stockroom.product_list().unwrap();
    let mut form = stockroom.new_product_form();
    form.set_name("Sprocket");
    let sprocket = form.save().unwrap();

    let mut form = stockroom.edit_product_form(&sprocket);
    form.set_stock(3);
    form.save().unwrap();

    assert!(list.refresh().unwrap());
    assert_eq!(list.products()[0].stock(), 3);
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            ChangeEvent::Created(sprocket.id()),
            ChangeEvent::Updated(sprocket.id()),
        ]
    );
}

#[test]
fn prices_display_in_configured_currency() {
    let stockroom = stockroom();
    let product = stockroom.repository().create(fields("Widget")).unwrap();

    let shown = stockroom.display_price(&product);
    assert!(shown.contains("9.99"), "unexpected price display {shown}");
}

//! One module per console page
//!
//! List pages share the load, render and delete-confirmation plumbing
//! below; each resource supplies its columns through [`PageView`].

pub mod cartridges;
pub mod dashboard;
pub mod locations;
pub mod login;
pub mod operations;
pub mod reports;
pub mod users;

use anyhow::anyhow;
use cartridge_client::listing::{DeletableResource, ListResource, load_error};
use cartridge_client::{DeleteConfirmation, DeleteState, ListController};

use crate::app::App;
use crate::render::{self, Table};

/// How a resource is shown in tables and detail views
pub trait PageView: ListResource {
    const TITLE: &'static str;
    const HEADERS: &'static [&'static str];

    fn row(item: &Self::Item) -> Vec<String>;

    fn details(item: &Self::Item) -> Vec<(&'static str, String)>;
}

/// Controller positioned on a 1-based page, nothing fetched yet
pub fn controller<R: ListResource>(
    app: &App,
    page: u32,
    filter: R::Filter,
    server_filters: bool,
) -> ListController<R> {
    ListController::<R>::new(app.api.clone())
        .server_filters(server_filters)
        .with_filter(filter)
        .starting_at(page)
}

/// Fetch a page and print it
pub async fn show_page<R: PageView>(
    app: &App,
    page: u32,
    filter: R::Filter,
    server_filters: bool,
) -> anyhow::Result<()> {
    let mut list = controller::<R>(app, page, filter, server_filters);
    list.load().await.map_err(|e| anyhow!(load_error::<R>(&e)))?;
    print_page(&list);
    Ok(())
}

pub fn print_page<R: PageView>(list: &ListController<R>) {
    println!("{}", R::TITLE);
    let visible = list.visible();
    if visible.is_empty() {
        println!("Нет данных");
    } else {
        let mut table = Table::new(R::HEADERS);
        for item in visible {
            table.push(R::row(item));
        }
        println!("{}", table.render());
    }
    println!(
        "{}",
        render::page_footer(list.display_page(), list.total_pages(), list.total_elements())
    );
}

pub fn print_items<R: PageView>(items: &[R::Item]) {
    if items.is_empty() {
        println!("Нет данных");
        return;
    }
    let mut table = Table::new(R::HEADERS);
    for item in items {
        table.push(R::row(item));
    }
    println!("{}", table.render());
}

pub fn print_details<R: PageView>(item: &R::Item) {
    println!("{}", render::details(&R::details(item)));
}

/// Run a mutation on the given page, then print the refreshed page
pub async fn mutate_and_show<R, T, F, Fut>(
    app: &App,
    page: u32,
    failed: &str,
    op: F,
) -> anyhow::Result<T>
where
    R: PageView,
    F: FnOnce(cartridge_client::ApiClient) -> Fut,
    Fut: std::future::Future<Output = cartridge_client::ClientResult<T>>,
{
    let mut list = controller::<R>(app, page, R::Filter::default(), false);
    let done = list.mutate(op).await.map_err(|e| anyhow!(e.user_message(failed)))?;
    match &done.refresh_error {
        Some(e) => eprintln!("{}", load_error::<R>(e)),
        None => print_page(&list),
    }
    Ok(done.into_value())
}

/// Show the snapshot; delete only with `confirmed`
///
/// `blocked_hint` is printed under the warning when the server refuses
/// because of related records.
pub async fn confirm_delete<R>(
    app: &App,
    item: R::Item,
    confirmed: bool,
    page: u32,
    blocked_hint: Option<&str>,
) -> anyhow::Result<()>
where
    R: PageView + DeletableResource,
{
    let mut dialog = DeleteConfirmation::<R>::new(item);
    print_details::<R>(dialog.item());

    if !confirmed {
        println!();
        println!("Внимание: это действие нельзя отменить.");
        println!("Для удаления повторите команду с флагом --yes");
        return Ok(());
    }

    let mut list = controller::<R>(app, page, R::Filter::default(), false);
    let state = dialog.confirm_in(&mut list).await.clone();
    match state {
        DeleteState::Deleted => {
            println!("Удалено");
            match dialog.refresh_error() {
                Some(message) => eprintln!("{}", message),
                None => print_page(&list),
            }
            Ok(())
        }
        DeleteState::Blocked(message) => match blocked_hint {
            Some(hint) => Err(anyhow!("{}\n{}", message, hint)),
            None => Err(anyhow!("{}", message)),
        },
        DeleteState::Failed(message) => Err(anyhow!("{}", message)),
        DeleteState::Pending => Ok(()),
    }
}

//! services/pagination_service.rs
//! Recorre listados paginados siguiendo `next_cursor`.
//!
//! No hay detección de ciclos: si Slack devolviera siempre el mismo cursor el
//! recorrido no terminaría.

use std::ops::ControlFlow;

use serde::de::DeserializeOwned;

use crate::{
    errors::JanitorError,
    models::{operation_model::Operation, response_model::PaginatedResult},
    services::slack_client::SlackClient,
};

/// Acumula, en orden de página y dentro de cada página, los items que pasan `keep`.
pub async fn collect_pages<T, F, P>(
    client: &SlackClient,
    make_op: F,
    mut keep: P,
) -> Result<Vec<T>, JanitorError>
where
    T: DeserializeOwned,
    F: Fn(Option<String>) -> Operation,
    P: FnMut(&T) -> bool,
{
    let mut acc = Vec::new();
    walk_pages(client, make_op, |item: T| -> ControlFlow<()> {
        if keep(&item) {
            acc.push(item);
        }
        ControlFlow::Continue(())
    })
    .await?;
    Ok(acc)
}

/// Devuelve el primer item que cumple `pred`; deja de pedir páginas en cuanto lo encuentra.
pub async fn find_in_pages<T, F, P>(
    client: &SlackClient,
    make_op: F,
    mut pred: P,
) -> Result<Option<T>, JanitorError>
where
    T: DeserializeOwned,
    F: Fn(Option<String>) -> Operation,
    P: FnMut(&T) -> bool,
{
    walk_pages(client, make_op, |item: T| {
        if pred(&item) {
            ControlFlow::Break(item)
        } else {
            ControlFlow::Continue(())
        }
    })
    .await
}

async fn walk_pages<T, B, F, V>(
    client: &SlackClient,
    make_op: F,
    mut visit: V,
) -> Result<Option<B>, JanitorError>
where
    T: DeserializeOwned,
    F: Fn(Option<String>) -> Operation,
    V: FnMut(T) -> ControlFlow<B>,
{
    let mut cursor: Option<String> = None;
    let mut page_no = 0usize;

    loop {
        page_no += 1;
        let op = make_op(cursor.take());
        let method = op.method();
        let reply = client.execute::<PaginatedResult<T>>(op).await?;
        let page = reply.body;

        if !page.ok {
            log::error!(
                "(walk_pages) {} página {} con ok=false:\n{}",
                method,
                page_no,
                reply.raw
            );
            return Err(JanitorError::logical(method, page.error.as_deref()));
        }

        let next = page.next_cursor().map(str::to_string);
        log::info!(
            "(walk_pages) {} página {}: {} items, siguiente cursor={:?}",
            method,
            page_no,
            page.items.len(),
            next
        );

        for item in page.items {
            if let ControlFlow::Break(found) = visit(item) {
                return Ok(Some(found));
            }
        }

        match next {
            Some(c) => cursor = Some(c),
            None => return Ok(None),
        }
    }
}

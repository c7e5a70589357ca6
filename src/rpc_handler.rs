//! RPC method handler for the BrewBrowser JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be tested without stdin/stdout.
//! `handle_method` dispatches a method call to the list view, detail view,
//! bookmark store or settings of an [`App`].

use serde_json::{json, Value};
use tracing::debug;

use crate::app::App;
use crate::managers::bookmark_store::BookmarkStoreTrait;
use crate::managers::detail_view::random_sample;
use crate::services::catalog_client::CatalogClientTrait;
use crate::services::settings_engine::SettingsEngineTrait;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn u32_param(params: &Value, name: &str) -> Result<Option<u32>, String> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| format!("invalid {}: expected a non-negative integer", name)),
    }
}

fn list_state<C: CatalogClientTrait>(app: &App<C>) -> Result<Value, String> {
    serde_json::to_value(app.list_view.snapshot()).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method<C: CatalogClientTrait>(
    app: &App<C>,
    method: &str,
    params: &Value,
) -> Result<Value, String> {
    debug!(method, "rpc call");
    match method {
        // ─── List view ───
        "list.mount" => {
            app.list_view.mount().await.map_err(|e| e.to_string())?;
            list_state(app)
        }
        "list.state" => list_state(app),
        "list.page" => {
            let page = u32_param(params, "page")?.ok_or("missing page")?;
            app.list_view.change_page(page).await.map_err(|e| e.to_string())?;
            list_state(app)
        }
        "list.search" => {
            let text = str_param(params, "text")?;
            app.list_view.search(text);
            list_state(app)
        }
        "list.settle" => {
            app.list_view.settle_search().await;
            list_state(app)
        }
        "list.reload" => {
            app.list_view.reload_list().await.map_err(|e| e.to_string())?;
            list_state(app)
        }

        // ─── Bookmarks ───
        "bookmark.toggle" => {
            let id = str_param(params, "id")?;
            let record = match app.list_view.find_record(id) {
                Some(record) => record,
                None => app.client.get_item(id).await.map_err(|e| e.to_string())?,
            };
            let saved = app
                .list_view
                .toggle_bookmark(&record)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"id": id, "saved": saved}))
        }
        "bookmark.clear" => {
            app.list_view
                .remove_all_bookmarks()
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.ids" => {
            let ids = app.list_view.store().get_ids().map_err(|e| e.to_string())?;
            Ok(json!(ids))
        }

        // ─── Detail view ───
        "detail.open" => {
            let id = str_param(params, "id")?;
            let mut detail = app.detail_view.lock().await;
            let found = detail.open(id).await.is_some();
            Ok(json!({"found": found, "view": detail.view()}))
        }
        "detail.view" => {
            let detail = app.detail_view.lock().await;
            Ok(json!({"id": detail.current_id(), "view": detail.view()}))
        }
        "sample.random" => {
            let default_size = app.settings().get_settings().list.random_sample_size;
            let size = u32_param(params, "size")?.unwrap_or(default_size);
            Ok(json!(random_sample(app.client.as_ref(), size).await))
        }

        // ─── Settings ───
        "settings.get" => {
            serde_json::to_value(app.settings().get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings().set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "restart_required": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

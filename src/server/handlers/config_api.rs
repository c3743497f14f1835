//! Read-only config endpoints used by the frontend map widgets

use super::super::reply::Reply;
use super::super::state::AppState;

/// `GET /config/tileserver`
pub fn handle_tile_server(state: &AppState) -> Reply {
    tile_server_reply(&state.config.tiles.tile_server_url)
}

/// `GET /config/nolabeltileserver`
pub fn handle_no_label_tile_server(state: &AppState) -> Reply {
    tile_server_reply(&state.config.tiles.no_label_tile_server_url)
}

/// `{"tileserver": "<url>"}`, laid out the way the frontend's fixtures expect
fn tile_server_reply(url: &str) -> Reply {
    let quoted = serde_json::Value::from(url).to_string();
    Reply::new(200, format!("{{\"tileserver\": {quoted}}}"))
        .with_header("Content-Type", "application/json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_server_body_layout() {
        let reply = tile_server_reply("https://tiles.test/{z}/{x}/{y}.png");
        assert_eq!(reply.status, 200);
        assert_eq!(reply.header("Content-Type"), Some("application/json"));
        assert_eq!(
            String::from_utf8(reply.body).unwrap(),
            r#"{"tileserver": "https://tiles.test/{z}/{x}/{y}.png"}"#
        );
    }

    #[test]
    fn test_tile_server_body_escapes_quotes() {
        let reply = tile_server_reply(r#"https://tiles.test/"x""#);
        let value: serde_json::Value = serde_json::from_slice(&reply.body).unwrap();
        assert_eq!(value["tileserver"], r#"https://tiles.test/"x""#);
    }
}

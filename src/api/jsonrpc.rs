// JSON-RPC 2.0 envelope and error types for the myMPD API.
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Remote methods used by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    PlayerOutputList,
    PlayerOutputToggle,
    PlayerOutputAttributesSet,
    PlayerVolumeGet,
    PlayerVolumeChange,
    PlayerVolumeSet,
    JukeboxList,
    JukeboxClear,
    JukeboxRm,
    SettingsGet,
    QueueAppendUris,
    QueueInsertUris,
    QueueReplaceUris,
    QueueAppendAlbums,
    QueueInsertAlbums,
    QueueReplaceAlbums,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlayerOutputList => "MYMPD_API_PLAYER_OUTPUT_LIST",
            Self::PlayerOutputToggle => "MYMPD_API_PLAYER_OUTPUT_TOGGLE",
            Self::PlayerOutputAttributesSet => "MYMPD_API_PLAYER_OUTPUT_ATTRIBUTES_SET",
            Self::PlayerVolumeGet => "MYMPD_API_PLAYER_VOLUME_GET",
            Self::PlayerVolumeChange => "MYMPD_API_PLAYER_VOLUME_CHANGE",
            Self::PlayerVolumeSet => "MYMPD_API_PLAYER_VOLUME_SET",
            Self::JukeboxList => "MYMPD_API_JUKEBOX_LIST",
            Self::JukeboxClear => "MYMPD_API_JUKEBOX_CLEAR",
            Self::JukeboxRm => "MYMPD_API_JUKEBOX_RM",
            Self::SettingsGet => "MYMPD_API_SETTINGS_GET",
            Self::QueueAppendUris => "MYMPD_API_QUEUE_APPEND_URIS",
            Self::QueueInsertUris => "MYMPD_API_QUEUE_INSERT_URIS",
            Self::QueueReplaceUris => "MYMPD_API_QUEUE_REPLACE_URIS",
            Self::QueueAppendAlbums => "MYMPD_API_QUEUE_APPEND_ALBUMS",
            Self::QueueInsertAlbums => "MYMPD_API_QUEUE_INSERT_ALBUMS",
            Self::QueueReplaceAlbums => "MYMPD_API_QUEUE_REPLACE_ALBUMS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method call with its params, built by the UI controllers and sent by
/// [`crate::api::MympdClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub params: Value,
}

impl ApiRequest {
    pub fn new(method: Method, params: Value) -> Self {
        Self { method, params }
    }

    pub fn empty(method: Method) -> Self {
        Self::new(method, Value::Object(Map::new()))
    }

    pub fn envelope(&self, id: u64) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": self.method.as_str(),
            "params": self.params,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

impl<T> RpcResponse<T> {
    pub fn into_result(self) -> Result<T, ApiError> {
        if let Some(error) = self.error {
            return Err(ApiError::Rpc {
                code: error.code,
                message: expand_phrase(&error.message, &error.data),
            });
        }
        self.result.ok_or(ApiError::MissingResult)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{message}")]
    Rpc { code: i64, message: String },
    #[error("Response contained no result")]
    MissingResult,
}

/// Fills `%{name}` placeholders of a server phrase from its data object.
/// Unknown placeholders are left as they are.
pub fn expand_phrase(phrase: &str, data: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(phrase.len());
    let mut rest = phrase;

    while let Some(start) = rest.find("%{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match data.get(key) {
            Some(Value::String(s)) => out.push_str(s),
            Some(Value::Null) | None => {
                out.push_str("%{");
                out.push_str(key);
                out.push('}');
            }
            Some(other) => out.push_str(&other.to_string()),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_method_and_params() {
        let request = ApiRequest::new(Method::PlayerVolumeSet, json!({ "volume": 40 }));
        let body = request.envelope(7);
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["id"], 7);
        assert_eq!(body["method"], "MYMPD_API_PLAYER_VOLUME_SET");
        assert_eq!(body["params"]["volume"], 40);
    }

    #[test]
    fn empty_request_sends_empty_object() {
        let request = ApiRequest::empty(Method::JukeboxClear);
        assert_eq!(request.params, json!({}));
    }

    #[test]
    fn error_object_becomes_rpc_error_with_expanded_message() {
        let response: RpcResponse<Value> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {
                "code": -32000,
                "message": "Output %{name} not found",
                "data": { "name": "Speakers" }
            }
        }))
        .unwrap();

        match response.into_result() {
            Err(ApiError::Rpc { code, message }) => {
                assert_eq!(code, -32000);
                assert_eq!(message, "Output Speakers not found");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, ApiError> {
        serde_json::from_value::<RpcResponse<T>>(body)?.into_result()
    }

    #[test]
    fn typed_result_decodes_from_envelope() {
        let outputs: crate::api::OutputList = decode(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "result": {
                "numOutputs": 1,
                "data": [
                    { "id": 0, "name": "Speakers", "plugin": "alsa", "state": 1, "attributes": {} }
                ]
            }
        }))
        .unwrap();
        assert_eq!(outputs.num_outputs, 1);
        assert_eq!(outputs.data[0].name, "Speakers");
        assert!(outputs.data[0].is_enabled());
    }

    #[test]
    fn missing_result_is_an_error() {
        let response: RpcResponse<Value> =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "id": 1 })).unwrap();
        assert!(matches!(response.into_result(), Err(ApiError::MissingResult)));
    }

    #[test]
    fn expand_phrase_keeps_unknown_placeholders() {
        let mut data = Map::new();
        data.insert("count".to_string(), json!(3));
        assert_eq!(
            expand_phrase("%{count} of %{total}", &data),
            "3 of %{total}"
        );
        assert_eq!(expand_phrase("broken %{tail", &data), "broken %{tail");
    }
}

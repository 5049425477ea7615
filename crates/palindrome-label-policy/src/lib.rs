use guest::prelude::*;
use kubewarden_policy_sdk::wapc_guest as guest;

use k8s_openapi::api::core::v1 as apicore;
use lazy_static::lazy_static;

extern crate kubewarden_policy_sdk as kubewarden;
use kubewarden::settings::SettingsValidationResponse;
use kubewarden::{logging, protocol_version_guest, request::ValidationRequest};

use slog::{Logger, info, o, warn};

/// Build a `CallResult` reporting that the policy settings are valid.
fn accept_settings() -> CallResult {
    Ok(serde_json::to_vec(&SettingsValidationResponse {
        valid: true,
        message: None,
    })?)
}

/// Build a `CallResult` reporting that the policy settings are invalid, with an
/// explanatory message shown to the user.
fn reject_settings(message: Option<String>) -> CallResult {
    Ok(serde_json::to_vec(&SettingsValidationResponse {
        valid: false,
        message,
    })?)
}

mod palindrome;
mod settings;

use settings::Settings;

lazy_static! {
    static ref LOG_DRAIN: Logger = Logger::root(
        logging::KubewardenDrain::new(),
        o!("policy" => "palindrome-label-policy")
    );
}

const HTTP_BAD_REQUEST_STATUS_CODE: u16 = 400;

#[unsafe(no_mangle)]
pub extern "C" fn wapc_init() {
    register_function("validate", validate);
    register_function("validate_settings", validate_settings);
    register_function("protocol_version", protocol_version_guest);
}

fn validate(payload: &[u8]) -> CallResult {
    let validation_request: ValidationRequest<Settings> = match ValidationRequest::new(payload) {
        Ok(validation_request) => validation_request,
        Err(err) => {
            warn!(
                LOG_DRAIN, "could not unmarshal validation request";
                "error" => err.to_string()
            );
            return kubewarden::reject_request(
                Some(err.to_string()),
                Some(HTTP_BAD_REQUEST_STATUS_CODE),
                None,
                None,
            );
        }
    };
    let settings = validation_request.settings;

    let pod = match serde_json::from_value::<apicore::Pod>(validation_request.request.object) {
        Ok(pod) => pod,
        Err(err) => {
            warn!(
                LOG_DRAIN, "could not unmarshal the pod under validation";
                "error" => err.to_string()
            );
            return kubewarden::reject_request(
                Some(err.to_string()),
                Some(HTTP_BAD_REQUEST_STATUS_CODE),
                None,
                None,
            );
        }
    };

    let pod_name = pod.metadata.name.unwrap_or_default();
    let labels = pod.metadata.labels.unwrap_or_default();

    // The scan is sorted (labels live in a BTreeMap) and stops at the first
    // offending key.
    for label_key in labels.keys() {
        if palindrome::is_palindrome(label_key) && !settings.is_an_allowed_palindrome(label_key) {
            info!(
                LOG_DRAIN, "could not validate pod, palindrome label keys found";
                "pod_name" => pod_name.as_str(),
                "allowed_palindromes" => settings.allowed_palindromes.join(",")
            );
            return kubewarden::reject_request(
                Some(format!(
                    "pod label with key {label_key} not allowed, the word is a palindrome"
                )),
                None,
                None,
                None,
            );
        }
    }

    kubewarden::accept_request()
}

fn validate_settings(payload: &[u8]) -> CallResult {
    let policy_settings: Settings = match serde_json::from_slice(payload) {
        Ok(policy_settings) => policy_settings,
        Err(err) => {
            warn!(
                LOG_DRAIN, "could not unmarshal policy settings";
                "error" => err.to_string()
            );
            return reject_settings(Some(format!(
                "policy settings not valid, error during the unmarshal: {err}"
            )));
        }
    };

    if let Err(err) = policy_settings.validate() {
        warn!(
            LOG_DRAIN, "policy settings not valid";
            "error" => err.to_string()
        );
        return reject_settings(Some(format!(
            "provided settings are not valid: {err}"
        )));
    }

    accept_settings()
}

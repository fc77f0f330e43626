pub(crate) mod json;

pub(crate) use json::json_response;

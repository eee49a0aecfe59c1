use serde::Serialize;

pub trait Method {
    /// Path relative to the client's base URL.
    const PATH: &'static str;

    type Params: Serialize;
}

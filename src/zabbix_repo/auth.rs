// user.login parameter dialects, tried in order until one is accepted.
// Older servers want `user`, 5.4+ want `username`.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginStrategy {
    pub name: &'static str,
    /// Name of the parameter carrying the user name.
    pub user_param: &'static str,
}

pub const LOGIN_STRATEGIES: &[LoginStrategy] = &[
    LoginStrategy {
        name: "user",
        user_param: "user",
    },
    LoginStrategy {
        name: "username",
        user_param: "username",
    },
];

impl LoginStrategy {
    pub fn params(&self, user: &str, password: &str) -> Value {
        let mut params = Map::new();
        params.insert(self.user_param.to_string(), Value::from(user));
        params.insert("password".to_string(), Value::from(password));
        Value::Object(params)
    }
}

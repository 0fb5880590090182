//! Paths of the server endpoints the client talks to.

pub const DATA_PATH: &str = "/api/data";
pub const ADD_INCOME_PATH: &str = "/api/add-income";
pub const ADD_EXPENSE_PATH: &str = "/api/add-expense";
pub const UPDATE_SAVINGS_PATH: &str = "/api/update-savings";

pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_or_without_trailing_slash() {
        assert_eq!(
            endpoint_url("http://127.0.0.1:8080", DATA_PATH),
            "http://127.0.0.1:8080/api/data"
        );
        assert_eq!(
            endpoint_url("http://127.0.0.1:8080/", UPDATE_SAVINGS_PATH),
            "http://127.0.0.1:8080/api/update-savings"
        );
    }
}

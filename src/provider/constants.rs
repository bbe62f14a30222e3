pub mod azure {
    pub const API_VERSION: &str = "2024-10-21";
    pub const ENDPOINT_ENV_VAR: &str = "AZURE_OPENAI_ENDPOINT";
    pub const API_KEY_ENV_VAR: &str = "AZURE_OPENAI_API_KEY";
    pub const DEPLOYMENT_ENV_VAR: &str = "AZURE_OPENAI_DEPLOYMENT";
    pub const API_KEY_HEADER: &str = "api-key";
}

pub mod openai {
    pub const API_BASE: &str = "https://api.openai.com/v1";
    pub const CHAT_COMPLETIONS_PATH: [&str; 2] = ["chat", "completions"];
    pub const ENDPOINT_ENV_VAR: &str = "OPENAI_BASE_URL";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
    pub const MODEL_ENV_VAR: &str = "OPENAI_MODEL";
}

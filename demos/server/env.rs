use super::*;

pub fn load_env_file() {
    let current_dir = stdenv::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
    let env_path = current_dir.join(".env");

    if dotenv().is_err() {
        warn!(
            ".env file not found, using process environment. Looked for: {}",
            env_path.display()
        );
    } else {
        info!(".env loading at: {}", env_path.display());
    }
}

pub fn load_env_var(key: &str, default: &str) -> String {
    stdenv::var(key).unwrap_or_else(|_| default.to_string())
}

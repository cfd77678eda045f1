/// Utility helpers for rustympd

/// Sleeps without blocking the UI thread on either target.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u32) {
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}

/// Splits a comma separated field list, dropping blanks.
pub fn parse_field_list<S: AsRef<str>>(s: S) -> Vec<String> {
    s.as_ref()
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

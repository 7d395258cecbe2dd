fn main() {
    // Forward the ESP-IDF build environment to dependent crates when the
    // board build is requested; host builds (tests) have nothing to forward.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}

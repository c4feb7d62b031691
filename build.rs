fn main() {
    // Recompile when the embedded migrations change.
    //
    // Specifying any rerun rule disables the default ones, so `Cargo.toml` must be listed
    // explicitly too.
    // <https://doc.rust-lang.org/cargo/reference/build-scripts.html#rerun-if-changed>
    build_rs::output::rerun_if_changed("src/db/migrations");
    build_rs::output::rerun_if_changed("Cargo.toml");
}

fn main() {
    // Only embed version info on Windows
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();

        let version = env!("CARGO_PKG_VERSION");
        let parts: Vec<&str> = version.split('.').collect();
        let version_string = format!(
            "{}.{}.{}.0",
            parts.first().unwrap_or(&"0"),
            parts.get(1).unwrap_or(&"0"),
            parts.get(2).unwrap_or(&"0")
        );

        res.set("ProductName", "tailer")
            .set(
                "FileDescription",
                "a simple CLI tool to insert lines when command output stops",
            )
            .set("FileVersion", &version_string)
            .set("ProductVersion", version);

        if let Err(e) = res.compile() {
            eprintln!("Warning: Failed to compile Windows resources: {}", e);
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}

fn main() {
    println!("cargo:rerun-if-changed=assets/logo.ico");

    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        res.set_icon("assets/logo.ico");
        res.set("ProductName", "NBA Player Statistics Explorer");
        res.compile().expect("Failed to compile Windows resources");
    }
}

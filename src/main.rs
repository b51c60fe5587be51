#![windows_subsystem = "windows"]

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--print-config") {
        let config = ori_menu::config::Config::default();
        match toml::to_string_pretty(&config) {
            Ok(s) => print!("{s}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("orimenu {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("orimenu {}", env!("CARGO_PKG_VERSION"));
        println!("A GPU-drawn context menu popup\n");
        println!("USAGE:");
        println!("    orimenu [OPTIONS]\n");
        println!("Right-click the window to open the menu. The id of the chosen");
        println!("item is printed to stdout.\n");
        println!("OPTIONS:");
        println!("    --print-config    Print the default configuration to stdout");
        println!("    --version, -V     Print version information");
        println!("    --help, -h        Print this help message\n");
        println!("ENVIRONMENT:");
        println!(
            "    {}      Log level: error, warn, info, debug, trace",
            ori_menu::logging::LOG_LEVEL_ENV
        );
        return;
    }

    ori_menu::logging::init();

    if let Err(e) = ori_menu::app::App::run() {
        log::error!("fatal: {e}");
        let path = ori_menu::logging::exe_dir().join("ori_menu_error.log");
        let _ = std::fs::write(path, format!("{e:?}"));
    }
}

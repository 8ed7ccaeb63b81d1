//! Mini Markup 命令行工具
//! 加载标记文件或地址，输出带样式的控件树

use clap::Parser;
use mini_markup::{LoadError, LoaderConfig, MarkupLoader, MemoryToolkit};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "mini-markup")]
#[command(about = "Build a widget tree from XML markup and apply its <style> rules")]
struct Args {
    /// 标记文件路径，或 http://、https://、file:// 地址
    source: String,

    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<String>,

    /// 以 JSON 输出收集到的样式规则，而不是控件树
    #[arg(long)]
    rules: bool,
}

fn is_url(source: &str) -> bool {
    ["http://", "https://", "file://"]
        .iter()
        .any(|scheme| source.starts_with(scheme))
}

fn run(args: &Args) -> Result<(), LoadError> {
    let config = match &args.config {
        Some(path) => LoaderConfig::from_file(path)?,
        None => LoaderConfig::default(),
    };

    let mut loader = MarkupLoader::with_config(MemoryToolkit::new(), config);
    let ready = Rc::new(Cell::new(false));
    let flag = ready.clone();
    loader.add_listener(move |_| flag.set(true));

    if is_url(&args.source) {
        loader.load_from_url(&args.source);
        loader.wait_pending();
    } else {
        let text = std::fs::read_to_string(&args.source)?;
        loader.load_from_string(&text)?;
    }

    if !ready.get() {
        return Err(LoadError::Fetch {
            url: args.source.clone(),
            message: "document was not built".to_string(),
        });
    }

    if args.rules {
        println!("{}", serde_json::to_string_pretty(loader.registry().all())?);
    } else {
        print!("{}", loader.toolkit().dump());
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use log::info;
use metricviz::widget::BigNumberProps;
use metricviz::BigNumberWidget;
use std::io::{self, Read};

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("metricviz - Render metric cards to SVG");
        println!();
        println!("Usage: metricviz [OPTIONS] [PROPS_JSON]");
        println!();
        println!("Reads widget props as JSON from argument or stdin and outputs SVG.");
        println!();
        println!("Options:");
        println!("  -h, --help     Show this help message");
        println!("  -a, --alarm    Render an alarm panel (default: big number)");
        println!("  -p, --plan     Print the big number layout plan as JSON instead of SVG");
        println!();
        println!("Example:");
        println!("  metricviz '{{\"width\": 330, \"height\": 110, \"bigNumber\": 12300}}'");
        println!("  RUST_LOG=debug metricviz --plan < props.json");
        return;
    }

    let alarm = args.iter().any(|a| a == "-a" || a == "--alarm");
    let plan_only = args.iter().any(|a| a == "-p" || a == "--plan");

    // Get input from argument or stdin
    let input: String = match args.iter().skip(1).find(|a| !a.starts_with('-')) {
        Some(arg) => arg.clone(),
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("Error: failed to read from stdin: {}", e);
                std::process::exit(1);
            }
            buf
        }
    };

    if input.trim().is_empty() {
        eprintln!("Error: No input provided");
        std::process::exit(1);
    }

    let result = if alarm {
        metricviz::render_alarm(&input)
    } else if plan_only {
        plan(&input)
    } else {
        metricviz::render_big_number(&input)
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn plan(input: &str) -> metricviz::Result<String> {
    let props: BigNumberProps = serde_json::from_str(input)?;
    let plan = BigNumberWidget::new().plan(&props)?;
    info!("planned {}x{} card", props.width, props.height);
    Ok(serde_json::to_string_pretty(&plan)?)
}

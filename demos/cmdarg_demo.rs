use cmdarg::{
    ActionRegistry, Argument, Arity, CommandLineParser, FormatterParams, HelpFormatter, StoreTrue,
};

fn main() {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "cmdarg_demo".to_string());
    let registry = ActionRegistry::builtin();
    let mut clp = CommandLineParser::from_formatter(HelpFormatter::terminal(
        FormatterParams::new(program)
            .description("A test example for cmdarg")
            .epilogue("That's all folks!"),
    ));

    let arguments = vec![
        Argument::option("count")
            .short('c')
            .arity(Arity::Required)
            .help("A simple counter with a rather long helpful message indeed")
            .default_value("5")
            .shared_action(registry.get("store_int").expect("store_int is built-in")),
        Argument::option("supercalifragilistichespiralidoso")
            .short('s')
            .arity(Arity::Optional)
            .help("A very long thing to say in one sentence"),
        Argument::option("carramba")
            .help("What a surprise!")
            .default_value("false")
            .action(StoreTrue),
        Argument::option("verbose")
            .short('v')
            .help("Repeat for more output")
            .default_value("0")
            .shared_action(registry.get("increment_int").expect("increment_int is built-in")),
        Argument::positional("input").help("The input file"),
        Argument::positional("output").help("The output file"),
    ];

    for argument in arguments {
        if let Err(error) = clp.add_argument(argument) {
            eprintln!("{error}");
            std::process::exit(error.code().abs());
        }
    }

    let options = clp.parse();

    for (key, value) in &options {
        println!("{key}: {value}");
    }
}

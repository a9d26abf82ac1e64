use clap::{arg, crate_version, Command};
use tdr_codec::config::Config;
use tdr_codec::{emit, run_pipeline, tdr};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help = "Examples:
---------
Compress:      `tdrcc run -i capture.tdr -o out`
Generate:      `tdrcc generate -n 1024 -o capture.tdr`";

    let mut main_cmd = Command::new("tdrcc")
        .about("Compress JTAG TDR bit streams against a dynamic or static dictionary")
        .after_long_help(long_help)
        .version(crate_version!());

    main_cmd = main_cmd.subcommand(
        Command::new("run")
            .arg(arg!(-i --input <PATH> "input TDR path").required(true))
            .arg(arg!(-o --output <PATH> "output file prefix").required(true))
            .arg(arg!(-c --config <PATH> "YAML config file").required(false))
            .arg(arg!(--hex "input is hex TDR, 32 bits per line"))
            .arg(arg!(--stats "print pipeline stats to stderr"))
            .about("compress a TDR capture"),
    );

    main_cmd = main_cmd.subcommand(
        Command::new("generate")
            .arg(arg!(-n --len <N> "number of trits to generate").required(true))
            .arg(arg!(-o --output <PATH> "output TDR path").required(true))
            .arg(arg!(-s --seed <SEED> "PRNG seed").required(false))
            .arg(arg!(--"allow-x" "allow don't-care trits in the generated stream"))
            .about("generate a synthetic TDR capture"),
    );

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("run") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let hex = cmd.get_flag("hex");

        let mut config = match cmd.get_one::<String>("config") {
            Some(path) => Config::from_yaml_file(path)?,
            None => Config::default(),
        };
        config.hex = hex;

        let bits = if config.hex {
            tdr::read_hex(std::path::Path::new(path_in))?
        } else {
            tdr::read_text(std::path::Path::new(path_in))?
        };

        let partitions = run_pipeline(&bits, &config)?;

        let mut events_out = String::new();
        let mut preload_out = String::new();
        let mut resync_out = String::new();
        for partition in &partitions {
            events_out.push_str(&emit::render_events(&partition.events));
            for bit in &partition.preload_bits {
                preload_out.push(if *bit { '1' } else { '0' });
            }
            preload_out.push('\n');
            resync_out.push_str(&partition.resync);
            resync_out.push('\n');

            if cmd.get_flag("stats") {
                partition
                    .compressor_stats
                    .print_stats("run", &mut std::io::stderr())?;
                partition
                    .emitter_stats
                    .print_stats("run", &mut std::io::stderr())?;
            }
        }

        std::fs::write(format!("{path_out}.compressed"), events_out)?;
        std::fs::write(format!("{path_out}.preload"), preload_out)?;
        std::fs::write(format!("{path_out}.resync"), resync_out)?;
    }

    if let Some(cmd) = matches.subcommand_matches("generate") {
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let len: usize = cmd.get_one::<String>("len").expect(RCH).parse()?;
        let seed: u64 = match cmd.get_one::<String>("seed") {
            Some(s) => s.parse()?,
            None => 0,
        };
        let allow_x = cmd.get_flag("allow-x");
        let bits = tdr::generate(len, allow_x, seed);
        std::fs::write(path_out, tdr::write_text(&bits))?;
    }

    Ok(())
}

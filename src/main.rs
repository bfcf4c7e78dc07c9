use std::process::ExitCode;

use anyhow::Result;

use yang_verify::config::Config;
use yang_verify::verify::{SchemaNode, Verifier};

fn main() -> Result<ExitCode> {
    let config = Config::from_command_line()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let registry = config.load_typedefs()?;
    let node = SchemaNode::from_json(&config.read_schema()?);
    let value = config.read_value()?;

    // RFC 7951 encodes most kinds in a specific JSON form
    if let Some((kind, native)) = node.encoding_mismatch(&value) {
        log::warn!("{} value is encoded as JSON {:?}", kind, native);
    }

    let verifier = Verifier::with_options(&registry, config.verify_options);
    match verifier.verify_node(&value, &node) {
        Ok(()) => {
            println!("ok");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}

mod config;
mod logging;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

use config::CliConfig;
use dvbs_core::utils::split_ts_packets;
use dvbs_core::{CodeRate, DvbsEncoder, DvbsError, TsPacket, TS_PACKET_LEN};
use logging::{LogEvent, RunSummaryEvent, StructuredLogger};

#[derive(Parser, Debug)]
#[command(author, version, about = "DVB-S channel encoder", long_about = None)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: PathBuf,

    /// Inner convolutional code rate (overrides config), e.g. "1/2", "3/4".
    #[arg(short, long)]
    rate: Option<String>,

    /// Input file of concatenated 188-byte TS packets (overrides config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file for the raw IQ bit stream (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_rate(s: &str) -> Result<CodeRate> {
    match s {
        "1/2" => Ok(CodeRate::R1_2),
        "2/3" => Ok(CodeRate::R2_3),
        "3/4" => Ok(CodeRate::R3_4),
        "5/6" => Ok(CodeRate::R5_6),
        "7/8" => Ok(CodeRate::R7_8),
        other => Err(color_eyre::eyre::eyre!("unrecognized code rate: {other}")),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let mut config = CliConfig::from_file(&args.config)
        .wrap_err_with(|| format!("failed to load config from {}", args.config.display()))?;

    if let Some(rate) = &args.rate {
        config.code_rate = parse_rate(rate)?;
    }
    if let Some(input) = args.input {
        config.input_path = input;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }

    let mut logger = StructuredLogger::new(&config.logging)?;
    logger.log(LogEvent::Info {
        message: format!(
            "dvbs-cli starting: input={} output={} rate={:?}",
            config.input_path.display(),
            config.output_path.display(),
            config.code_rate
        ),
    })?;

    let data = fs::read(&config.input_path)
        .wrap_err_with(|| format!("failed to read {}", config.input_path.display()))?;

    let packets = split_ts_packets(&data).map_err(|e| {
        let message = e.to_string();
        let _ = logger.log(LogEvent::Error {
            message: message.clone(),
            details: None,
        });
        color_eyre::eyre::eyre!(message)
    })?;
    let total_packets = data.len() / TS_PACKET_LEN;

    let mut encoder = DvbsEncoder::from_config(dvbs_core::EncoderConfig {
        code_rate: config.code_rate,
        log: config.logging.to_core_log_config(),
    });

    let progress = ProgressBar::new(total_packets as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} packets",
        )
        .unwrap(),
    );

    let mut iq_bits: Vec<u8> = Vec::with_capacity(total_packets * config.code_rate.max_iq_capacity());
    let mut iq_scratch = vec![0u8; config.code_rate.max_iq_capacity()];
    let mut packets_skipped: u64 = 0;

    for (packet_index, chunk) in packets.enumerate() {
        let packet = match TsPacket::parse(chunk, packet_index) {
            Ok(packet) => packet,
            Err(DvbsError::UnexpectedSyncByte { byte, .. }) => {
                packets_skipped += 1;
                let message =
                    format!("packet {packet_index} has sync byte {byte:#04x}, expected 0x47");
                if config.strict {
                    logger.log(LogEvent::Error {
                        message: message.clone(),
                        details: None,
                    })?;
                    return Err(color_eyre::eyre::eyre!(message));
                }
                logger.log(LogEvent::Warn { message })?;
                continue;
            }
            Err(other) => return Err(other.into()),
        };

        let symbols = encoder.encode_packet(packet.as_bytes(), &mut iq_scratch);
        iq_bits.extend_from_slice(&iq_scratch[..symbols]);
        progress.inc(1);
    }
    progress.finish_and_clear();

    fs::write(&config.output_path, &iq_bits)
        .wrap_err_with(|| format!("failed to write {}", config.output_path.display()))?;

    let stats = encoder.stats();
    logger.log(LogEvent::RunSummary(RunSummaryEvent {
        timestamp: chrono::Utc::now(),
        duration_secs: logger.elapsed(),
        packets_encoded: stats.packets_encoded,
        iq_symbols_emitted: stats.iq_symbols_emitted,
        sync_inversions: stats.sync_inversions,
        code_rate_switches: stats.code_rate_switches,
        packets_skipped,
    }))?;

    Ok(())
}

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Clone, Copy, PartialEq, ValueEnum)]
pub enum Slot {
    /// Bare parameters, as found in the `Signature` header
    Signature,

    /// Parameters prefixed with `Signature `, as found in the `Authorization` header
    Authorization,
}

impl From<Slot> for httpsig::SignatureScheme {
    fn from(value: Slot) -> Self {
        match value {
            Slot::Signature => Self::Signature,
            Slot::Authorization => Self::Authorization,
        }
    }
}

#[derive(Args)]
pub struct ParseHeaderArgs {
    /// The header value to parse
    pub header: String,

    /// The header this value was taken from
    #[arg(
        default_value_t = Slot::Signature,
        long,
        short,
        value_enum,
    )]
    pub scheme: Slot,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Parse the HTTP Signature parameters and report any format errors
    ParseHeader(ParseHeaderArgs),
}

#[derive(Parser)]
#[command(about, version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}

//! Command-line flags.

use crate::models::record::{
    BROADCAST, FIRST, IP, LAST, NAME, NETMASK, NETWORK, PREFIX, SIZE, USABLE, WILDCARD,
};
use crate::output::OutputItem;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};

const USAGE: &str = "terminus [flags] IP
       terminus [flags] IP/PREFIX_LEN
       terminus [flags] INTERFACE
       terminus [-L | --list-interfaces]";

const EXAMPLES: &str = "Examples:
  terminus -i eth0                # 172.16.57.200
  terminus -p 10.0.0.138          # 8
  terminus -b 192.168.100.1/24    # 192.168.100.255

  terminus -f -l lo
  # 127.0.0.1
  # 127.255.255.254

  terminus -L
  # eth0    172.16.57.200   172.16.56.0     23
  # lo      127.0.0.1       127.0.0.0       8

  terminus -t '{{.ip}}/{{.prefix}} ({{.network}} - {{.broadcast}})' tun0
  # 10.197.63.254/11 (10.192.0.0 - 10.223.255.255)";

/// terminus is an IP subnet address calculator.
#[derive(Parser, Debug, Default)]
#[command(
    name = "terminus",
    about = "terminus is an IP subnet address calculator.",
    long_about = "terminus is an IP subnet address calculator.\n\
        For a given IPv4 address (and optional prefix length), it calculates \
        network address, broadcast address, maximum number of hosts, etc.",
    override_usage = USAGE,
    after_help = EXAMPLES,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Cli {
    /// Show the broadcast address of the subnet
    #[arg(short = 'b', long)]
    pub broadcast: bool,

    /// Show the first usable IP address of the subnet
    #[arg(short = 'f', long)]
    pub first: bool,

    /// Show the IP address
    #[arg(short = 'i', long)]
    pub ip: bool,

    /// Show the last usable IP address of the subnet
    #[arg(short = 'l', long)]
    pub last: bool,

    /// List all network interfaces
    #[arg(short = 'L', long)]
    pub list_interfaces: bool,

    /// Show the subnet mask in dot-decimal notation
    #[arg(short = 'm', long)]
    pub netmask: bool,

    /// Show the name of the network interface (if possible)
    #[arg(long)]
    pub name: bool,

    /// Show the network address
    #[arg(short = 'n', long)]
    pub network: bool,

    /// Show the prefix length
    #[arg(short = 'p', long)]
    pub prefix: bool,

    /// Show the IP range of the subnet
    #[arg(short = 'r', long)]
    pub range: bool,

    /// Count the total number of IPs of the subnet
    #[arg(short = 's', long)]
    pub size: bool,

    /// Format the output with the given template expression
    #[arg(short = 't', long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Count the number of hosts of the subnet
    #[arg(short = 'u', long)]
    pub usable: bool,

    /// Print version information and exit
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Show the wildcard mask of the subnet
    #[arg(short = 'w', long)]
    pub wildcard: bool,

    /// IP, IP/PREFIX_LEN or INTERFACE; the last one wins
    #[arg(value_name = "ARG")]
    pub args: Vec<String>,
}

/// Parse a full argv (program name first).
pub fn parse_args<I, T>(argv: I) -> Result<(Cli, ArgMatches), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = Cli::command().try_get_matches_from(argv)?;
    let cli = Cli::from_arg_matches(&matches)?;
    Ok((cli, matches))
}

impl Cli {
    /// The argument to resolve, if any.
    pub fn target(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    /// Requested outputs, in the order their flags appear on the command line.
    pub fn output_items(&self, matches: &ArgMatches) -> Vec<OutputItem> {
        let fields = [
            (BROADCAST, self.broadcast),
            (FIRST, self.first),
            (IP, self.ip),
            (LAST, self.last),
            (NETMASK, self.netmask),
            (NAME, self.name),
            (NETWORK, self.network),
            (PREFIX, self.prefix),
            (SIZE, self.size),
            (USABLE, self.usable),
            (WILDCARD, self.wildcard),
        ];

        let mut items: Vec<(usize, OutputItem)> = fields
            .into_iter()
            .filter(|(_, set)| *set)
            .map(|(key, _)| (position(matches, key), OutputItem::Field(key)))
            .collect();
        if self.range {
            items.push((position(matches, "range"), OutputItem::Range));
        }
        if let Some(text) = &self.template {
            items.push((position(matches, "template"), OutputItem::Template(text.clone())));
        }

        items.sort_by_key(|(i, _)| *i);
        items.into_iter().map(|(_, item)| item).collect()
    }
}

fn position(matches: &ArgMatches, id: &str) -> usize {
    matches.index_of(id).unwrap_or(usize::MAX)
}

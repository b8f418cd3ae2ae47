use crate::prelude::{println, *};
use colored::Colorize;
use devkit_core::subnet::{self, SubnetInfo, SubnetSplit};
use serde::Serialize;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SubnetOptions {
    /// CIDR block, e.g. 192.168.1.0/24 (read from stdin when omitted or `-`)
    cidr: Option<String>,

    /// Split the block into child subnets of this prefix length
    #[arg(short, long)]
    split: Option<u8>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct SubnetOutput {
    #[serde(flatten)]
    pub info: SubnetInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<SubnetSplit>,
}

pub fn subnet_data(cidr: &str, split: Option<u8>) -> Result<SubnetOutput> {
    let info = subnet::calculate_str(cidr)?;
    let split = split
        .map(|prefix| subnet::split(&info, prefix))
        .transpose()?;
    Ok(SubnetOutput { info, split })
}

pub fn run(options: SubnetOptions, global: crate::Global) -> Result<()> {
    let cidr = read_input(options.cidr.clone())?;
    log::debug!("subnet cidr={cidr:?} split={:?}", options.split);

    let output = subnet_data(&cidr, options.split)?;

    if options.json {
        return print_json(&output);
    }

    output_info(&output.info, global.verbose);
    if let Some(split) = &output.split {
        output_split(split);
    }
    Ok(())
}

fn output_info(info: &SubnetInfo, verbose: bool) {
    let tty = is_tty();
    let label = |text: &str| {
        if tty {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    };

    let mut table = new_table();
    table.add_row(prettytable::row![
        label("Network"),
        f!("{}/{}", info.network_address, info.prefix)
    ]);
    table.add_row(prettytable::row![label("Subnet mask"), info.subnet_mask]);
    table.add_row(prettytable::row![label("Wildcard mask"), info.wildcard_mask]);
    table.add_row(prettytable::row![label("Broadcast"), info.broadcast_address]);
    table.add_row(prettytable::row![label("First host"), info.first_host]);
    table.add_row(prettytable::row![label("Last host"), info.last_host]);
    table.add_row(prettytable::row![label("Total hosts"), info.total_hosts]);
    table.add_row(prettytable::row![label("Usable hosts"), info.usable_hosts]);
    table.add_row(prettytable::row![label("Class"), info.ip_class]);
    if verbose {
        table.add_row(prettytable::row![label("Address (bin)"), info.binary.address]);
        table.add_row(prettytable::row![label("Mask (bin)"), info.binary.mask]);
    }
    table.printstd();
}

fn output_split(split: &SubnetSplit) {
    println!();
    let heading = f!(
        "{} split into {} x /{} ({} hosts each)",
        split.parent,
        split.total_subnets,
        split.prefix,
        split.hosts_per_subnet
    );
    if is_tty() {
        println!("{}", heading.bold());
    } else {
        println!("{heading}");
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["NETWORK", "FIRST HOST", "LAST HOST", "BROADCAST"]);
    for child in &split.subnets {
        table.add_row(prettytable::row![
            child.network,
            child.first_host,
            child.last_host,
            child.broadcast
        ]);
    }
    table.printstd();

    if split.truncated {
        println!(
            "Showing the first {} of {} subnets",
            split.subnets.len(),
            split.total_subnets
        );
    }
}

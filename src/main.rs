#[macro_use]
extern crate structopt;

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate failure_derive;

extern crate failure;
extern crate rusoto_core;
extern crate rusoto_ec2;
extern crate rusoto_ssm;
extern crate serde;
extern crate serde_json;

use std::process;

use structopt::StructOpt;

use args::*;
use ec2_ops::*;
use lt_types::*;
use ssm_ops::*;

mod args;
mod ec2_ops;
mod lt_types;
mod ssm_ops;

/// AWS Launch Template AMI Updater
/// Command Line
/// --region, -r => Region the template and parameter live in
/// --parameter, -p => SSM parameter holding the AMI (env: AMI_PARAMETER)
/// --launch-template, -l, --lt => Launch Template name (env: LAUNCH_TEMPLATE_NAME)
/// --ami-type, -t => ecs | ec2, picks the default parameter and its format
/// --quiet, -q => No unnecessary output
///
/// TODO
/// - --dry-run flag that reports the pending version without creating it
fn main() {
    let options = match Opt::clap().get_matches_safe() {
        Ok(matches) => Opt::from_clap(&matches),
        // Exits with error code 1 even for VersionDisplayed and HelpDisplayed
        Err(err) => {
            println!("{}", err.message);
            process::exit(1)
        }
    };

    if !options.quiet {
        println!("Using parameter: {}", options.parameter_path());
        println!("Using launch template: {}", options.template_name());
    }

    let ssm = SSMOps::new(&options.region);
    let lt = LTOps::new(&options.region);

    if let Err(err) = run(&ssm, &lt, &options) {
        eprintln!("Error: {}", err);
        process::exit(1)
    }
}

fn run(ssm: &SSMOps, lt: &LTOps, options: &Opt) -> Result<(), LTUpdateError> {
    let new_ami = ssm.get_ami_id(&options.parameter_path(), options.ami_type)?;
    let current = lt.get_default_version(&options.template_name())?;

    if !options.quiet {
        println!("Old launch template version: {}", current.version_number);
        println!("New ami-id: {}", new_ami);
        println!("Old ami-id: {}", current.image_id);
    }

    match lt.update_ami(&current, &new_ami)? {
        Some(created) => {
            if !options.quiet {
                println!(
                    "Created version {} of {}",
                    created.version_number, created.template_name
                );
            }
            lt.promote_default_version(&created)?;
            if !options.quiet {
                println!("Version {} is now the default", created.version_number);
            }
        }
        None => {
            if !options.quiet {
                println!("No need to update the AMI");
            }
        }
    }

    Ok(())
}

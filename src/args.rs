use std::str::FromStr;
use structopt::StructOpt;

pub const DEFAULT_ECS_PARAMETER: &str =
    "/aws/service/ecs/optimized-ami/amazon-linux-2023/recommended";
pub const DEFAULT_EC2_PARAMETER: &str =
    "/aws/service/ami-amazon-linux-latest/al2023-ami-kernel-6.1-x86_64";
pub const DEFAULT_LT_NAME: &str = "bys-dev-lt-ecs-main";

#[derive(StructOpt, Debug)]
#[structopt(
    name = "lt_updater",
    about = "AWS Launch Template AMI Updater - Keeps a Launch Template pointed at the latest published AMI."
)]
pub struct Opt {
    /// AWS Region
    #[structopt(short = "r", long = "region", default_value = "us-east-1")]
    pub region: String,
    /// SSM Parameter path for the AMI (default: ECS or EC2 path per --ami-type)
    #[structopt(short = "p", long = "parameter", env = "AMI_PARAMETER")]
    pub parameter: Option<String>,
    /// Launch Template name
    #[structopt(
        short = "l",
        long = "launch-template",
        visible_alias = "lt",
        env = "LAUNCH_TEMPLATE_NAME"
    )]
    pub launch_template: Option<String>,
    /// AMI type: ecs (ECS optimized) or ec2 (standard AL2023)
    #[structopt(
        short = "t",
        long = "ami-type",
        default_value = "ecs",
        possible_values = &["ecs", "ec2"]
    )]
    pub ami_type: AmiType,
    /// Quiet Mode => Only Errors and Parameter Output
    #[structopt(short = "q", long = "quiet")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmiType {
    /// Recommendation payload, the AMI id sits in the `image_id` field.
    Ecs,
    /// Plain parameter, the value is the AMI id itself.
    Ec2,
}

impl FromStr for AmiType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ecs" => Ok(AmiType::Ecs),
            "ec2" => Ok(AmiType::Ec2),
            other => Err(format!("unsupported ami type: {}", other)),
        }
    }
}

impl Opt {
    /// Parameter path: flag wins, then AMI_PARAMETER, then the compiled-in
    /// path for the selected AMI type.
    pub fn parameter_path(&self) -> String {
        match &self.parameter {
            Some(path) => path.clone(),
            None => match self.ami_type {
                AmiType::Ecs => DEFAULT_ECS_PARAMETER.to_string(),
                AmiType::Ec2 => DEFAULT_EC2_PARAMETER.to_string(),
            },
        }
    }

    /// Launch template name: flag wins, then LAUNCH_TEMPLATE_NAME, then the
    /// compiled-in default.
    pub fn template_name(&self) -> String {
        match &self.launch_template {
            Some(name) => name.clone(),
            None => DEFAULT_LT_NAME.to_string(),
        }
    }
}

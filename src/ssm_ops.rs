use rusoto_core::{Region, RusotoError};
use rusoto_ssm::{GetParameterError, GetParameterRequest, Ssm, SsmClient};
use std::fmt;

use crate::args::AmiType;
use crate::lt_types::{LTUpdateError, RecommendedAmi};

pub struct SSMOps {
    region: String,
    ssm_client: SsmClient,
}

impl fmt::Debug for SSMOps {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ region: {} }}", self.region)
    }
}

impl SSMOps {
    pub fn new(region: &str) -> Self {
        SSMOps {
            region: region.to_string(),
            ssm_client: SsmClient::new(region.parse::<Region>().unwrap_or(Region::default())),
        }
    }

    /// Constructor for callers that bring their own client, tests mostly.
    pub fn with_client(region: &str, ssm_client: SsmClient) -> Self {
        SSMOps {
            region: region.to_string(),
            ssm_client,
        }
    }

    /// GET the parameter value from the parameter store, always decrypted.
    pub fn get_parameter_value(&self, name: &str) -> Result<String, LTUpdateError> {
        let input = GetParameterRequest {
            name: name.to_string(),
            with_decryption: Some(true),
        };
        match self.ssm_client.get_parameter(input).sync() {
            Ok(output) => output
                .parameter
                .and_then(|p| p.value)
                .ok_or_else(|| LTUpdateError::MalformedParameter {
                    name: name.to_string(),
                    reason: "parameter has no value".to_string(),
                }),
            Err(RusotoError::Service(GetParameterError::ParameterNotFound(_))) => {
                Err(LTUpdateError::ParameterNotFound {
                    name: name.to_string(),
                })
            }
            Err(err) => Err(LTUpdateError::ParameterLookupFailed {
                name: name.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    /// Resolve the AMI id held by the parameter. The ECS recommendation
    /// parameter wraps it in a JSON payload, the plain EC2 parameter is the
    /// id itself.
    pub fn get_ami_id(&self, name: &str, ami_type: AmiType) -> Result<String, LTUpdateError> {
        let value = self.get_parameter_value(name)?;
        match ami_type {
            AmiType::Ec2 => Ok(value),
            AmiType::Ecs => {
                let recommended: RecommendedAmi =
                    serde_json::from_str(&value).map_err(|err| {
                        LTUpdateError::MalformedParameter {
                            name: name.to_string(),
                            reason: err.to_string(),
                        }
                    })?;
                Ok(recommended.image_id)
            }
        }
    }
}

use rusoto_core::{Region, RusotoError};
use rusoto_ec2::{
    CreateLaunchTemplateVersionRequest, DescribeLaunchTemplateVersionsRequest, Ec2, Ec2Client,
    ModifyLaunchTemplateRequest, RequestLaunchTemplateData,
};
use std::fmt;

use crate::lt_types::{LTNewVersion, LTUpdateError, LTVersion};

/// Stamped on every version this tool creates.
pub const VERSION_DESCRIPTION: &str = "Update AMI to latest release";

pub struct LTOps {
    region: String,
    ec2_client: Ec2Client,
}

impl fmt::Debug for LTOps {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ region: {} }}", self.region)
    }
}

impl LTOps {
    pub fn new(region: &str) -> Self {
        LTOps {
            region: region.to_string(),
            ec2_client: Ec2Client::new(region.parse::<Region>().unwrap_or(Region::default())),
        }
    }

    /// Constructor for callers that bring their own client, tests mostly.
    pub fn with_client(region: &str, ec2_client: Ec2Client) -> Self {
        LTOps {
            region: region.to_string(),
            ec2_client,
        }
    }

    /// Fetch the version currently tagged $Default for the named template.
    pub fn get_default_version(&self, lt_name: &str) -> Result<LTVersion, LTUpdateError> {
        let input = DescribeLaunchTemplateVersionsRequest {
            launch_template_name: Some(lt_name.to_string()),
            versions: Some(vec!["$Default".to_string()]),
            ..Default::default()
        };
        let output = match self.ec2_client.describe_launch_template_versions(input).sync() {
            Ok(output) => output,
            Err(err) => return Err(Self::map_describe_error(lt_name, err)),
        };

        let version = output
            .launch_template_versions
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| LTUpdateError::TemplateNotFound {
                name: lt_name.to_string(),
            })?;

        let image_id = version
            .launch_template_data
            .and_then(|data| data.image_id)
            .ok_or_else(|| LTUpdateError::TemplateLookupFailed {
                name: lt_name.to_string(),
                reason: "default version carries no ImageId".to_string(),
            })?;

        Ok(LTVersion {
            template_id: version.launch_template_id.ok_or_else(|| {
                LTUpdateError::TemplateLookupFailed {
                    name: lt_name.to_string(),
                    reason: "response carries no LaunchTemplateId".to_string(),
                }
            })?,
            template_name: version
                .launch_template_name
                .unwrap_or_else(|| lt_name.to_string()),
            version_number: version.version_number.ok_or_else(|| {
                LTUpdateError::TemplateLookupFailed {
                    name: lt_name.to_string(),
                    reason: "response carries no VersionNumber".to_string(),
                }
            })?,
            image_id,
        })
    }

    /// Create a new version with the fetched AMI when it differs from the
    /// default version's AMI. Returns None when the ids already match; no
    /// remote call is made in that case.
    pub fn update_ami(
        &self,
        current: &LTVersion,
        new_ami: &str,
    ) -> Result<Option<LTNewVersion>, LTUpdateError> {
        if current.image_id == new_ami {
            return Ok(None);
        }

        let input = CreateLaunchTemplateVersionRequest {
            launch_template_id: Some(current.template_id.clone()),
            source_version: Some(current.version_number.to_string()),
            launch_template_data: RequestLaunchTemplateData {
                image_id: Some(new_ami.to_string()),
                ..Default::default()
            },
            version_description: Some(VERSION_DESCRIPTION.to_string()),
            ..Default::default()
        };
        match self.ec2_client.create_launch_template_version(input).sync() {
            Ok(output) => {
                let version = output.launch_template_version.ok_or_else(|| {
                    LTUpdateError::VersionCreateFailed {
                        name: current.template_name.clone(),
                        reason: "response carries no version".to_string(),
                    }
                })?;
                Ok(Some(LTNewVersion {
                    template_name: version
                        .launch_template_name
                        .unwrap_or_else(|| current.template_name.clone()),
                    version_number: version.version_number.ok_or_else(|| {
                        LTUpdateError::VersionCreateFailed {
                            name: current.template_name.clone(),
                            reason: "response carries no VersionNumber".to_string(),
                        }
                    })?,
                }))
            }
            Err(err) => Err(LTUpdateError::VersionCreateFailed {
                name: current.template_name.clone(),
                reason: err.to_string(),
            }),
        }
    }

    /// Swing the template's default pointer to the freshly created version.
    pub fn promote_default_version(&self, new_version: &LTNewVersion) -> Result<(), LTUpdateError> {
        let input = ModifyLaunchTemplateRequest {
            launch_template_name: Some(new_version.template_name.clone()),
            default_version: Some(new_version.version_number.to_string()),
            ..Default::default()
        };
        match self.ec2_client.modify_launch_template(input).sync() {
            Ok(_) => Ok(()),
            Err(err) => Err(LTUpdateError::PromotionFailed {
                name: new_version.template_name.clone(),
                version: new_version.version_number,
                reason: err.to_string(),
            }),
        }
    }

    // EC2 does not model its errors, a missing template comes back as a
    // generic response with a NotFoundException code in the body.
    fn map_describe_error(
        lt_name: &str,
        err: RusotoError<rusoto_ec2::DescribeLaunchTemplateVersionsError>,
    ) -> LTUpdateError {
        match err {
            RusotoError::Unknown(response) => {
                let body = String::from_utf8_lossy(response.body.as_ref());
                if body.contains("NotFoundException") {
                    LTUpdateError::TemplateNotFound {
                        name: lt_name.to_string(),
                    }
                } else {
                    LTUpdateError::TemplateLookupFailed {
                        name: lt_name.to_string(),
                        reason: format!("HTTP {}: {}", response.status, body),
                    }
                }
            }
            err => LTUpdateError::TemplateLookupFailed {
                name: lt_name.to_string(),
                reason: err.to_string(),
            },
        }
    }
}

/// Recommendation payload stored in the ECS optimized AMI parameter. The
/// payload also carries image_name, os and agent/runtime versions; only the
/// AMI id is of interest here.
#[derive(Deserialize, Debug)]
pub struct RecommendedAmi {
    pub image_id: String,
}

/// The current default version of a launch template, as returned by
/// DescribeLaunchTemplateVersions with the $Default selector.
#[derive(Debug, Clone, PartialEq)]
pub struct LTVersion {
    pub template_id: String,
    pub template_name: String,
    pub version_number: i64,
    pub image_id: String,
}

/// A freshly created, not yet default, launch template version.
#[derive(Debug, Clone, PartialEq)]
pub struct LTNewVersion {
    pub template_name: String,
    pub version_number: i64,
}

#[derive(Debug, Fail)]
pub enum LTUpdateError {
    #[fail(display = "Parameter not found: {}", name)]
    ParameterNotFound { name: String },
    #[fail(display = "Failed to read parameter {}: {}", name, reason)]
    ParameterLookupFailed { name: String, reason: String },
    #[fail(display = "Unusable value in parameter {}: {}", name, reason)]
    MalformedParameter { name: String, reason: String },
    #[fail(display = "Launch template not found: {}", name)]
    TemplateNotFound { name: String },
    #[fail(display = "Failed to describe launch template {}: {}", name, reason)]
    TemplateLookupFailed { name: String, reason: String },
    #[fail(display = "Failed to create a new version of {}: {}", name, reason)]
    VersionCreateFailed { name: String, reason: String },
    #[fail(
        display = "Failed to promote version {} of {}: {}; the new version was created but is not the default",
        version, name, reason
    )]
    PromotionFailed {
        name: String,
        version: i64,
        reason: String,
    },
}

use log::debug;

use crate::plugin_system::descriptor::DescriptorSet;
use crate::plugin_system::error::PluginSystemError;

/// Checks that every dependency of every descriptor is met by some other
/// descriptor in the same set.
///
/// Descriptors are checked in ascending id order and their dependencies in
/// declaration order; the first unmet (or malformed) constraint aborts the
/// whole validation. There is no partial result.
pub fn validate(descriptors: &DescriptorSet) -> Result<(), PluginSystemError> {
    for descriptor in descriptors {
        for constraint in descriptor.constraints()? {
            let satisfied = descriptors
                .get(&constraint.required_id)
                .is_some_and(|candidate| constraint.is_satisfied_by(candidate));

            if !satisfied {
                return Err(PluginSystemError::UnsatisfiedDependency {
                    owner: descriptor.id.clone(),
                    required: constraint.required_id,
                    requirement: constraint.requirement,
                });
            }
            debug!("'{}' dependency on '{}' satisfied", descriptor.id, constraint);
        }
    }
    Ok(())
}

use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::ResourceRequirements, apimachinery::pkg::api::resource::Quantity,
};

use crate::quantity::{CpuQuantity, MemoryQuantity};

/// Builds [`ResourceRequirements`] where every configured dimension is both requested and limited
/// to the same quantity.
///
/// CPU and memory are independent of each other, a dimension that was never set is absent from
/// both maps. If nothing was set at all the maps themselves stay `None`.
#[derive(Clone, Debug, Default)]
pub struct ResourceRequirementsBuilder {
    cpu: Option<Quantity>,
    memory: Option<Quantity>,
}

impl ResourceRequirementsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cpu(&mut self, cpu: CpuQuantity) -> &mut Self {
        self.cpu = Some(cpu.into());
        self
    }

    pub fn with_memory(&mut self, memory: MemoryQuantity) -> &mut Self {
        self.memory = Some(memory.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.cpu.is_none() && self.memory.is_none()
    }

    pub fn build(&self) -> ResourceRequirements {
        let mut quantities: BTreeMap<String, Quantity> = BTreeMap::new();

        if let Some(cpu) = &self.cpu {
            quantities.insert("cpu".into(), cpu.clone());
        }

        if let Some(memory) = &self.memory {
            quantities.insert("memory".into(), memory.clone());
        }

        // Only add limits/requests when there is actually stuff to add
        let quantities = if quantities.is_empty() {
            None
        } else {
            Some(quantities)
        };

        ResourceRequirements {
            limits: quantities.clone(),
            requests: quantities,
            ..ResourceRequirements::default()
        }
    }
}

//! Export sessions.

use std::collections::HashSet;

use desmos_types::{MeshSource, TransformSampler};
use tracing::debug;

use crate::assemble::{AssembledObject, assemble_animation, assemble_geometry, assemble_object};
use crate::error::{ExportError, ExportResult};
use crate::ident::{IdentifierScheme, object_prefixes};
use crate::params::ExportParams;
use crate::record::ObjectRecord;

/// Ordered records of one export plus the parameters they were built with.
///
/// Records keep selection order, and object names are unique within a
/// session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSession {
    params: ExportParams,
    records: Vec<ObjectRecord>,
    names: HashSet<String>,
    face_too_large: bool,
}

impl ExportSession {
    /// Empty session; `params` are normalized.
    #[must_use]
    pub fn new(params: &ExportParams) -> Self {
        Self {
            params: params.normalized(),
            records: Vec::new(),
            names: HashSet::new(),
            face_too_large: false,
        }
    }

    /// Assemble every object in `objects`, in order.
    ///
    /// # Errors
    ///
    /// Returns the first assembly error, or [`ExportError::DuplicateObject`]
    /// if a name appears twice.
    pub fn assemble<'a, I, M, T>(
        objects: I,
        meshes: &M,
        sampler: &mut T,
        params: &ExportParams,
    ) -> ExportResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
        M: MeshSource + ?Sized,
        T: TransformSampler + ?Sized,
    {
        Self::assemble_with(objects, params, |object, params| {
            assemble_object(object, meshes, sampler, params)
        })
    }

    /// Assemble every object in `objects` from one scene that supplies both
    /// meshes and transforms.
    ///
    /// # Errors
    ///
    /// Returns the first assembly error, or [`ExportError::DuplicateObject`]
    /// if a name appears twice.
    pub fn assemble_scene<'a, I, S>(
        objects: I,
        scene: &mut S,
        params: &ExportParams,
    ) -> ExportResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
        S: MeshSource + TransformSampler + ?Sized,
    {
        Self::assemble_with(objects, params, |object, params| {
            let mut assembled = assemble_geometry(object, &*scene, &params.geometry)?;
            if params.animation.samples_anything() {
                assemble_animation(&mut assembled.record, scene, &params.animation)?;
            }
            Ok(assembled)
        })
    }

    fn assemble_with<'a, I, F>(
        objects: I,
        params: &ExportParams,
        mut assemble: F,
    ) -> ExportResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
        F: FnMut(&str, &ExportParams) -> ExportResult<AssembledObject>,
    {
        let mut session = Self::new(params);
        for object in objects {
            if session.contains(object) {
                return Err(ExportError::DuplicateObject {
                    name: object.to_string(),
                });
            }
            let assembled = assemble(object, &session.params)?;
            session.push(assembled)?;
        }
        debug!(
            objects = session.records.len(),
            face_too_large = session.face_too_large,
            "Session assembled"
        );
        Ok(session)
    }

    /// Append an assembled object.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::DuplicateObject`] if the session already has a
    /// record with the same name.
    pub fn push(&mut self, assembled: AssembledObject) -> ExportResult<()> {
        let AssembledObject {
            record,
            face_too_large,
        } = assembled;
        if !self.names.insert(record.name.clone()) {
            return Err(ExportError::DuplicateObject { name: record.name });
        }
        self.face_too_large |= face_too_large;
        self.records.push(record);
        Ok(())
    }

    /// Whether a record named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Records in selection order.
    #[must_use]
    pub fn records(&self) -> &[ObjectRecord] {
        &self.records
    }

    /// Normalized parameters.
    #[must_use]
    pub const fn params(&self) -> &ExportParams {
        &self.params
    }

    /// Whether any object has a polygon with more than four corners.
    #[must_use]
    pub const fn face_too_large(&self) -> bool {
        self.face_too_large
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the session has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One prefix per record, in order.
    #[must_use]
    pub fn prefixes(&self) -> Vec<String> {
        object_prefixes(
            self.params.naming,
            self.records.iter().map(|r| r.name.as_str()),
        )
    }

    /// Identifier scheme for this session.
    #[must_use]
    pub fn identifiers(&self) -> IdentifierScheme {
        IdentifierScheme::new(self.params.naming, self.records.len())
    }
}

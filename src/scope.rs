use thiserror::Error;
use tracing::{debug, warn};

use crate::{id::InstanceId, value_box::{AssignOutcome, ValueBox}};

/// Handle to a box declared in a [`Scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxRef(usize);

/// How copy-assignment from a drained box is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignPolicy {
    /// Copy the value, keep the target's slot, emit an advisory.
    #[default]
    Lenient,
    /// Reject the assignment without touching the target.
    Strict,
}

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("Box reference {index} does not belong to this scope")]
    UnknownBox {
        index: usize,
    },
    #[error("Refusing to copy drained box {src} into box {dst}")]
    DrainedSource {
        dst: InstanceId,
        src: InstanceId,
    },
}

/// Boxes living in one lexical scope.
///
/// Boxes are addressed through [`BoxRef`]s, so assigning a box to itself is
/// expressible and gets detected by comparing handles. Dropping the scope
/// destroys the boxes in reverse declaration order.
#[derive(Debug)]
pub struct Scope {
    boxes: Vec<ValueBox>,
    policy: AssignPolicy,
}

impl Scope {
    pub fn new(policy: AssignPolicy) -> Self {
        Scope { boxes: Vec::new(), policy }
    }

    pub fn policy(&self) -> AssignPolicy { self.policy }

    pub fn len(&self) -> usize { self.boxes.len() }

    pub fn is_empty(&self) -> bool { self.boxes.is_empty() }

    pub fn declare(&mut self, b: ValueBox) -> BoxRef {
        debug!("declaring box {} as #{}", b.id(), self.boxes.len());
        self.boxes.push(b);

        BoxRef(self.boxes.len() - 1)
    }

    pub fn get(&self, r: BoxRef) -> Result<&ValueBox, ScopeError> {
        self.boxes.get(r.0).ok_or(ScopeError::UnknownBox { index: r.0 })
    }

    pub fn get_mut(&mut self, r: BoxRef) -> Result<&mut ValueBox, ScopeError> {
        self.boxes.get_mut(r.0).ok_or(ScopeError::UnknownBox { index: r.0 })
    }

    pub fn copy_assign(&mut self, dst: BoxRef, src: BoxRef) -> Result<AssignOutcome, ScopeError> {
        if dst == src {
            self.get(dst)?;
            warn!("useless assignment!");
            return Ok(AssignOutcome::SelfAssignment);
        }

        let policy = self.policy;
        let (target, source) = self.pair_mut(dst, src)?;
        if policy == AssignPolicy::Strict && source.is_drained() {
            return Err(ScopeError::DrainedSource { dst: target.id(), src: source.id() });
        }

        Ok(target.copy_assign(source))
    }

    pub fn move_assign(&mut self, dst: BoxRef, src: BoxRef) -> Result<AssignOutcome, ScopeError> {
        if dst == src {
            self.get(dst)?;
            warn!("useless move assignment!");
            return Ok(AssignOutcome::SelfAssignment);
        }

        let (target, source) = self.pair_mut(dst, src)?;

        Ok(target.move_assign(source))
    }

    /// Borrows two distinct boxes at once.
    fn pair_mut(&mut self, dst: BoxRef, src: BoxRef) -> Result<(&mut ValueBox, &mut ValueBox), ScopeError> {
        for r in [dst, src] {
            self.get(r)?;
        }

        if dst.0 < src.0 {
            let (head, tail) = self.boxes.split_at_mut(src.0);
            Ok((&mut head[dst.0], &mut tail[0]))
        } else {
            let (head, tail) = self.boxes.split_at_mut(dst.0);
            Ok((&mut tail[0], &mut head[src.0]))
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        debug!("leaving scope with {} boxes", self.boxes.len());

        while let Some(b) = self.boxes.pop() {
            drop(b);
        }
    }
}

use crate::{
    db::{
        arena::{ClauseOffset, ClauseStats},
        watches::Watched,
        ClauseKey,
    },
    procedures::{add::ClauseOk, renumber::RenumberStats},
    structures::{clause::CClause, literal::CLiteral},
    types::err::{self},
};

use super::Context;

/// The capability given to collaborators which restructure the clause database, e.g. preprocessing passes.
///
/// A collaborator may detach clauses, delete detached clauses, store fresh clauses, and renumber atoms.
/// Before returning control, a collaborator must leave every clause it touched either fully attached or deleted.
///
/// Keys and literals are in the inner numbering of atoms.
pub trait AttachmentPort {
    /// The value of the literal, if valued at decision level zero.
    fn fixed_value(&self, literal: CLiteral) -> Option<bool>;

    /// Keys to every long clause, irredundant clauses first.
    fn long_clauses(&self) -> Vec<ClauseKey>;

    /// Keys to every attached binary and ternary clause, each once.
    fn implicit_clauses(&self) -> Vec<ClauseKey>;

    /// The literals of the clause.
    fn clause_literals(&self, key: &ClauseKey) -> Result<CClause, err::ClauseDBError>;

    /// Whether the clause is redundant, together with the stored statistics of the clause.
    fn clause_stats(&self, key: &ClauseKey) -> Result<(bool, ClauseStats), err::ClauseDBError>;

    /// Attaches a detached clause.
    fn attach(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError>;

    /// Detaches an attached clause.
    fn detach(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError>;

    /// Deletes a detached clause.
    fn delete(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError>;

    /// Deletes a detached clause, though leaves the key listed by [long_clauses](AttachmentPort::long_clauses) until [forget_deleted](AttachmentPort::forget_deleted).
    fn delete_deferred(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError>;

    /// Completes every deferred deletion.
    fn forget_deleted(&mut self);

    /// Replaces the literals of a detached long clause with a strict subset of at least four of its literals.
    fn shrink(&mut self, key: &ClauseKey, subset: &[CLiteral]) -> Result<(), err::ClauseDBError>;

    /// Stores a fresh clause, as [add_clause_int](Context::add_clause_int).
    fn store(
        &mut self,
        literals: CClause,
        redundant: bool,
        stats: ClauseStats,
    ) -> Result<ClauseOk, err::ErrorKind>;

    /// Renumbers atoms, as [renumber_atoms](Context::renumber_atoms).
    fn renumber(&mut self) -> Result<RenumberStats, err::ClauseDBError>;
}

impl AttachmentPort for Context {
    fn fixed_value(&self, literal: CLiteral) -> Option<bool> {
        self.atom_db.fixed_value(literal)
    }

    fn long_clauses(&self) -> Vec<ClauseKey> {
        self.catalog
            .long_irredundant
            .iter()
            .chain(self.catalog.long_redundant.iter())
            .map(|offset: &ClauseOffset| ClauseKey::Long(*offset))
            .collect()
    }

    fn implicit_clauses(&self) -> Vec<ClauseKey> {
        let mut keys = Vec::default();
        for (literal, list) in self.watches.iter() {
            for entry in list {
                match *entry {
                    Watched::Binary { other, learnt } if literal < other => {
                        keys.push(ClauseKey::Binary {
                            literals: [literal, other],
                            redundant: learnt,
                        })
                    }
                    Watched::Ternary { others, learnt } if literal < others[0] => {
                        keys.push(ClauseKey::Ternary {
                            literals: [literal, others[0], others[1]],
                            redundant: learnt,
                        })
                    }
                    _ => {}
                }
            }
        }
        keys
    }

    fn clause_literals(&self, key: &ClauseKey) -> Result<CClause, err::ClauseDBError> {
        match key {
            ClauseKey::Long(offset) => Ok(self.arena.literals(*offset)?.to_vec()),
            _ => Ok(key.implicit_literals().to_vec()),
        }
    }

    fn clause_stats(&self, key: &ClauseKey) -> Result<(bool, ClauseStats), err::ClauseDBError> {
        match key {
            ClauseKey::Unit(_) => Ok((false, ClauseStats::default())),
            ClauseKey::Binary { redundant, .. } | ClauseKey::Ternary { redundant, .. } => {
                Ok((*redundant, ClauseStats::default()))
            }
            ClauseKey::Long(offset) => {
                let header = self.arena.header(*offset)?;
                Ok((header.learnt, header.stats))
            }
        }
    }

    fn attach(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError> {
        self.attach_clause(key)
    }

    fn detach(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError> {
        self.detach_clause(key)
    }

    fn delete(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError> {
        self.delete_clause(key)
    }

    fn delete_deferred(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError> {
        self.delete_clause_deferred(key)
    }

    fn forget_deleted(&mut self) {
        Context::forget_deleted(self);
    }

    fn shrink(&mut self, key: &ClauseKey, subset: &[CLiteral]) -> Result<(), err::ClauseDBError> {
        match key {
            ClauseKey::Long(offset) => self.shrink_clause(*offset, subset),
            _ => Err(err::ClauseDBError::NotSubset),
        }
    }

    fn store(
        &mut self,
        literals: CClause,
        redundant: bool,
        stats: ClauseStats,
    ) -> Result<ClauseOk, err::ErrorKind> {
        self.add_clause_int(literals, redundant, stats, true)
    }

    fn renumber(&mut self) -> Result<RenumberStats, err::ClauseDBError> {
        self.renumber_atoms()
    }
}

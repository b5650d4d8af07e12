//! Member roster management.

use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::domain::commands::{CreateMemberCommand, UpdateMemberCommand};
use crate::domain::errors::{DomainError, Result};
use crate::domain::models::Member;
use crate::domain::store::Store;

#[derive(Clone)]
pub struct MemberService {
    store: Arc<Store>,
}

impl MemberService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn create_member(&self, command: CreateMemberCommand) -> Result<Member> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("member name is required"));
        }
        let unit = normalize_unit(command.unit);

        let now_millis = Utc::now().timestamp_millis() as u64;
        let member = Member {
            id: Member::generate_id(now_millis),
            name: name.to_string(),
            unit,
            active: command.active,
        };

        let created = member.clone();
        self.store.mutate(move |s| {
            s.members.push(member);
            Ok(())
        })?;

        info!("Created member {} ({})", created.name, created.id);
        Ok(created)
    }

    /// Edit a member in place. Identity is immutable; renames keep the
    /// member's ledger history attached.
    pub fn update_member(&self, command: UpdateMemberCommand) -> Result<Member> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("member name is required"));
        }
        let unit = normalize_unit(command.unit);

        let updated = self.store.mutate(|s| {
            let member = s
                .members
                .iter_mut()
                .find(|m| m.id == command.member_id)
                .ok_or_else(|| DomainError::not_found("member", &command.member_id))?;
            member.name = name;
            member.unit = unit;
            member.active = command.active;
            Ok(member.clone())
        })?;

        info!("Updated member {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Toggle roster membership. Deactivated members keep their ledger
    /// history and totals but drop out of rankings and active rosters.
    pub fn set_member_active(&self, member_id: &str, active: bool) -> Result<Member> {
        let updated = self.store.mutate(|s| {
            let member = s
                .members
                .iter_mut()
                .find(|m| m.id == member_id)
                .ok_or_else(|| DomainError::not_found("member", member_id))?;
            member.active = active;
            Ok(member.clone())
        })?;

        info!(
            "Member {} ({}) is now {}",
            updated.name,
            updated.id,
            if active { "active" } else { "inactive" }
        );
        Ok(updated)
    }

    pub fn get_member(&self, member_id: &str) -> Result<Member> {
        self.store.read(|s| {
            s.members
                .iter()
                .find(|m| m.id == member_id)
                .cloned()
                .ok_or_else(|| DomainError::not_found("member", member_id))
        })
    }

    /// All members, name-sorted.
    pub fn list_members(&self) -> Vec<Member> {
        self.store.read(|s| {
            let mut members = s.members.clone();
            members.sort_by(|a, b| a.name.cmp(&b.name));
            members
        })
    }

    /// Active members only, name-sorted.
    pub fn list_active_members(&self) -> Vec<Member> {
        let mut members = self.list_members();
        members.retain(|m| m.active);
        members
    }
}

fn normalize_unit(unit: Option<String>) -> Option<String> {
    unit.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

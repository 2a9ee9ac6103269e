//! # Domain Module
//!
//! Business logic for handing out household chores.
//!
//! Every domain (a household, a shared flat, a garden) has a deck of chore
//! templates. Each template's `count` says how many cards of that chore are
//! in the deck for the month. Every day each member of a domain draws one
//! card; finished chores either go back into the deck or stay out until the
//! domain resets on the first of the next month.
//!
//! ## Module Organization
//!
//! - **dates**: Calendar helpers shared by the scheduling code
//! - **availability**: Remaining cards per template after pending assignments
//! - **gap_filler**: Retroactive assignments for days the minion missed
//! - **assignment_service**: Per-minion orchestration across all domains
//! - **bucketizer**: Today / this week / overdue split for display
//! - **shuffle**: Injectable shuffling of the deck
//! - **minion_service**, **domain_service**, **task_service**: Management
//! - **assignment_actions**: Completing and returning assignments
//! - **overview_service**: The minion's home screen
//!
//! ## Business Rules
//!
//! - A minion gets at most one assignment per domain per calendar day
//! - A template is never handed out more often than its count allows
//! - The `NoTask` placeholder marks a free day and is never stored
//! - Only a domain's owner may delete it

pub mod assignment_actions;
pub mod assignment_service;
pub mod availability;
pub mod bucketizer;
pub mod dates;
pub mod domain_service;
pub mod error;
pub mod gap_filler;
pub mod minion_service;
pub mod overview_service;
pub mod shuffle;
pub mod task_service;

pub use assignment_actions::AssignmentActions;
pub use assignment_service::AssignmentService;
pub use bucketizer::{split_pending_assignments, PendingSplit};
pub use domain_service::DomainService;
pub use error::{SchedulerError, ValidationError};
pub use minion_service::MinionService;
pub use overview_service::OverviewService;
pub use shuffle::{InOrder, RandomShuffler, SeededShuffler, Shuffler};
pub use task_service::TaskService;

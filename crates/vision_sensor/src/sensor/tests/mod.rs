//! Scanner tests against mock and reference collaborators

mod mocks;

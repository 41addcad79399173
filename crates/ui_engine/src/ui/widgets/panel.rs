//! Plain container

use super::base::Widget;

/// Container that only paints its node's background
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panel;

impl Widget for Panel {}

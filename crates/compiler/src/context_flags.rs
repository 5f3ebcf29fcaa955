use std::ops::BitAnd;

#[derive(Debug, Copy, Clone)]
pub(crate) struct ContextFlags(pub u8);

#[derive(Debug, Copy, Clone)]
pub(crate) struct ContextFlag(u8);

impl ContextFlags {
    pub const IN_KEYFRAMES: ContextFlag = ContextFlag(1);
    pub const IN_UNKNOWN_AT_RULE: ContextFlag = ContextFlag(1 << 1);
    pub const AT_ROOT_EXCLUDING_STYLE_RULE: ContextFlag = ContextFlag(1 << 2);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn unset(&mut self, flag: ContextFlag) {
        self.0 &= !flag.0;
    }

    pub fn set(&mut self, flag: ContextFlag, v: bool) {
        if v {
            self.0 |= flag.0;
        } else {
            self.unset(flag);
        }
    }

    pub fn in_keyframes(self) -> bool {
        (self.0 & Self::IN_KEYFRAMES) != 0
    }

    pub fn in_unknown_at_rule(self) -> bool {
        (self.0 & Self::IN_UNKNOWN_AT_RULE) != 0
    }

    pub fn at_root_excluding_style_rule(self) -> bool {
        (self.0 & Self::AT_ROOT_EXCLUDING_STYLE_RULE) != 0
    }
}

impl BitAnd<ContextFlag> for u8 {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: ContextFlag) -> Self::Output {
        self & rhs.0
    }
}

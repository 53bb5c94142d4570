//! Caller-context capability
//!
//! A thread-local stack of class-context frames. A static method that
//! wants its own `Type` without naming itself enters a frame on entry
//! (`ClassFrame::enter` or the `class_frame!` macro); `Type::from_caller`
//! then reads the frame one level above the invoking helper.
//!
//! Frames carry the Rust `TypeId` of the entered type; resolution back to
//! a `Type` goes through the registry's instance index.

use std::any::TypeId;
use std::cell::RefCell;
use std::marker::PhantomData;

use crate::error::TypeError;

/// Frames skipped by caller resolution: exactly the invoking helper.
pub const CALLER_SKIP: usize = 1;

thread_local! {
    static FRAMES: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

/// RAII guard for one class-context frame.
///
/// Pushed on construction, popped on drop. Frames nest; block scoping
/// keeps drop order matched to construction order within a thread. The
/// guard is `!Send`: frames live in thread-local storage and must be
/// popped on the thread that pushed them.
pub struct ClassFrame {
    _not_send: PhantomData<*const ()>,
}

impl ClassFrame {
    /// Enter a class-context frame for `T`.
    pub fn enter<T: ?Sized + 'static>() -> Self {
        FRAMES.with(|frames| frames.borrow_mut().push(TypeId::of::<T>()));
        ClassFrame {
            _not_send: PhantomData,
        }
    }
}

impl Drop for ClassFrame {
    fn drop(&mut self) {
        FRAMES.with(|frames| {
            frames.borrow_mut().pop();
        });
    }
}

/// Rust `TypeId` of the frame `depth` levels below the top of the stack.
///
/// Depth 0 is the most recently entered frame.
pub(crate) fn peek(depth: usize) -> Result<TypeId, TypeError> {
    FRAMES.with(|frames| {
        let frames = frames.borrow();
        frames
            .len()
            .checked_sub(depth + 1)
            .and_then(|idx| frames.get(idx).copied())
            .ok_or(TypeError::NoCallerContext(depth))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Outer;
    struct Inner;

    #[test]
    fn test_empty_stack_has_no_context() {
        assert_eq!(peek(0), Err(TypeError::NoCallerContext(0)));
        assert_eq!(peek(CALLER_SKIP), Err(TypeError::NoCallerContext(1)));
    }

    #[test]
    fn test_peek_depths() {
        let _outer = ClassFrame::enter::<Outer>();
        let _inner = ClassFrame::enter::<Inner>();

        assert_eq!(peek(0), Ok(TypeId::of::<Inner>()));
        assert_eq!(peek(1), Ok(TypeId::of::<Outer>()));
        assert_eq!(peek(2), Err(TypeError::NoCallerContext(2)));
    }

    #[test]
    fn test_frames_pop_on_drop() {
        {
            let _outer = ClassFrame::enter::<Outer>();
            {
                let _inner = ClassFrame::enter::<Inner>();
                assert_eq!(peek(0), Ok(TypeId::of::<Inner>()));
            }
            assert_eq!(peek(0), Ok(TypeId::of::<Outer>()));
        }
        assert_eq!(peek(0), Err(TypeError::NoCallerContext(0)));
    }

    #[test]
    fn test_frames_are_thread_local() {
        let _outer = ClassFrame::enter::<Outer>();

        let handle = std::thread::spawn(|| peek(0));
        assert_eq!(handle.join().unwrap(), Err(TypeError::NoCallerContext(0)));
    }
}

mod dispatch;
mod stdio;

#[derive(Clone,Debug,PartialEq,Eq,Hash)]
pub(crate) struct BitSet {
    size:usize,
    //bits past size are always 0, so derived Eq/Hash only see real bits
    bytes:Vec<u8>
}

impl BitSet {
    pub(crate) fn new() -> Self {
        Self {size:0,bytes:vec![]}
    }
    pub(crate) fn with_capacity(capacity:usize) -> Self {
        if capacity == 0 {return Self::new()}
        let vec_capacity = capacity/8 + 1;
        Self {
            size:0,
            bytes:Vec::with_capacity(vec_capacity)
        }
    }
    // len bits, all cleared
    pub(crate) fn zeroed(len:usize) -> Self {
        Self {
            size:len,
            bytes:vec![0;len.div_ceil(8)]
        }
    }
    pub(crate) fn len(&self) -> usize {
        self.size
    }
    pub(crate) fn push_bit(&mut self, bit:bool) {
        let byte_pos = self.size / 8;
        let pos_in_byte = self.size % 8;

        debug_assert!(byte_pos <= self.bytes.len());

        if let Some(byte) = self.bytes.get_mut(byte_pos) {
            let mask = 1u8 << pos_in_byte;
            if bit {
                *byte |= mask;
            }else{
                *byte &= !mask;
            }
        }else{
            self.bytes.push(bit as u8)
        }
        self.size += 1;
    }
    pub(crate) fn get_at(&self,index:usize) -> Option<bool> {
        if index >= self.size {return None}
        let byte_pos = index / 8;
        let pos_in_byte = index % 8;
        let byte = self.bytes.get(byte_pos)?;
        let mask = 1u8 << pos_in_byte;
        Some(*byte & mask > 0)
    }
    pub(crate) fn store_at(&mut self,index:usize,bit:bool) -> Option<()> {
        if index >= self.size {return None}
        let byte_pos = index / 8;
        let pos_in_byte = index % 8;
        let byte = self.bytes.get_mut(byte_pos)?;
        let mask = 1u8 << pos_in_byte;
        if bit {
            *byte |= mask;
        }else{
            *byte &= !mask;
        }
        Some(())
    }
    // sets every bit in start..end, None if the range runs past len
    pub(crate) fn store_range(&mut self,start:usize,end:usize) -> Option<()> {
        if end > self.size || start > end {return None}
        for index in start..end {
            self.store_at(index, true)?;
        }
        Some(())
    }
    // bitwise OR, None on length mismatch
    pub(crate) fn union_with(&mut self,other:&BitSet) -> Option<()> {
        if self.size != other.size {return None}
        for (left,right) in self.bytes.iter_mut().zip(other.bytes.iter()) {
            *left |= *right;
        }
        Some(())
    }
    pub(crate) fn count_ones(&self) -> usize {
        self.bytes.iter().map(|byte| byte.count_ones() as usize).sum()
    }
    pub(crate) fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(|index| {
            self.bytes[index / 8] & (1u8 << (index % 8)) > 0
        })
    }
}

impl Default for BitSet {
    fn default() -> Self {
        Self::new()
    }
}
